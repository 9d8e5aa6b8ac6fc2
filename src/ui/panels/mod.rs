// UniAIMS - ui/panels/mod.rs

pub mod about;
pub mod analysis;
pub mod dashboard;
pub mod data_batch;
pub mod docs;
pub mod export_modal;
pub mod finetune;
pub mod reports;
pub mod sidebar;
pub mod upload;
pub mod warnings;
pub mod workstation;
