// UniAIMS - core/docs.rs
//
// Built-in documentation: a fixed section tree and the text for the
// pages that have been written so far.

/// An entry in a documentation section: a page, or a labelled group of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocItem {
    Page(&'static str),
    Group {
        label: &'static str,
        pages: &'static [&'static str],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocSection {
    pub title: &'static str,
    pub items: &'static [DocItem],
}

pub const DOC_SECTIONS: &[DocSection] = &[
    DocSection {
        title: "Getting Started",
        items: &[
            DocItem::Page("Introduction"),
            DocItem::Page("Installation"),
            DocItem::Page("Quick Start Guide"),
            DocItem::Page("System Requirements"),
        ],
    },
    DocSection {
        title: "Core Concepts",
        items: &[
            DocItem::Group {
                label: "Particle Analysis",
                pages: &["Particle Overview", "Spherical Mode", "Irregular Mode"],
            },
            DocItem::Page("Fiber Analysis"),
            DocItem::Page("Model Architecture"),
            DocItem::Page("Workspace Management"),
        ],
    },
    DocSection {
        title: "Advanced Features",
        items: &[
            DocItem::Page("Fine-tuning Models"),
            DocItem::Page("Custom Datasets"),
            DocItem::Page("API Integration"),
            DocItem::Page("Reporting Tools"),
        ],
    },
    DocSection {
        title: "Troubleshooting",
        items: &[
            DocItem::Page("Common Errors"),
            DocItem::Page("Performance Optimization"),
            DocItem::Page("FAQ"),
            DocItem::Page("Support"),
        ],
    },
];

pub const DEFAULT_PAGE: &str = "Introduction";

const INTRODUCTION: &str = "\
# Introduction

UniAIMS is a workstation for analysing microscopy images of materials. It \
detects particles and fibers in SEM and optical images, measures their \
geometry and summarises the results as distributions and reports.

## What you can do

- Upload image batches and organise them into data batches
- Run particle or fiber recognition tasks against a model version
- Inspect detections on the interactive canvas
- Compare attribute distributions across images and tasks
- Assemble charts into a report
";

const INSTALLATION: &str = "\
# Installation

UniAIMS ships as a single desktop executable.

1. Download the build for your platform.
2. Run the executable. No installer or runtime is required.
3. Settings are read from `config.toml` in the platform config directory. \
The file is optional; missing values use built-in defaults.

Run with `--debug` to enable verbose logging.
";

const PARTICLE_OVERVIEW: &str = "\
# Particle Analysis

Particle recognition segments each image into individual particles and \
measures area, perimeter, equivalent diameter, axis lengths, aspect ratio, \
sphericity and circularity.

Two detection modes are available:

- **Spherical** for near-round particles
- **Irregular** for flakes, agglomerates and fragments

Open a task and choose **Particles** in the sidebar to inspect the results.
";

const SPHERICAL_MODE: &str = "\
# Spherical Mode

Spherical mode fits a circle to each detected particle. It is the fastest \
mode and works best on well-separated, near-round particles.

Use the **Filters** panel to hide detections below a minimum diameter and \
the **Scale Bar** panel to calibrate pixel size before measuring.
";

const IRREGULAR_MODE: &str = "\
# Irregular Mode

Irregular mode traces the full outline of each particle. Shape descriptors \
such as solidity and form factor are only meaningful in this mode.

Overlapping particles are separated by watershed splitting. Increase the \
minimum area filter if noise is reported as small particles.
";

/// Text for a documented page, or `None` if the page has no content yet.
pub fn content(page: &str) -> Option<&'static str> {
    match page {
        "Introduction" => Some(INTRODUCTION),
        "Installation" => Some(INSTALLATION),
        "Particle Overview" => Some(PARTICLE_OVERVIEW),
        "Spherical Mode" => Some(SPHERICAL_MODE),
        "Irregular Mode" => Some(IRREGULAR_MODE),
        _ => None,
    }
}

/// Every page in tree order.
pub fn all_pages() -> Vec<&'static str> {
    let mut pages = Vec::new();
    for section in DOC_SECTIONS {
        for item in section.items {
            match item {
                DocItem::Page(p) => pages.push(*p),
                DocItem::Group { pages: group, .. } => pages.extend_from_slice(group),
            }
        }
    }
    pages
}

/// Pages whose title contains `query`, ignoring case. An empty query matches all.
pub fn search(query: &str) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();
    all_pages()
        .into_iter()
        .filter(|p| needle.is_empty() || p.to_lowercase().contains(&needle))
        .collect()
}

/// The section title a page belongs to.
pub fn section_of(page: &str) -> Option<&'static str> {
    DOC_SECTIONS
        .iter()
        .find(|s| {
            s.items.iter().any(|item| match item {
                DocItem::Page(p) => *p == page,
                DocItem::Group { pages, .. } => pages.contains(&page),
            })
        })
        .map(|s| s.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_has_eighteen_pages() {
        let pages = all_pages();
        assert_eq!(pages.len(), 18);
        assert_eq!(pages[0], DEFAULT_PAGE);
        assert!(pages.contains(&"Irregular Mode"));
    }

    #[test]
    fn test_content_only_for_written_pages() {
        assert!(content("Introduction").is_some());
        assert!(content("Spherical Mode").unwrap().starts_with("# Spherical Mode"));
        assert!(content("FAQ").is_none());
    }

    #[test]
    fn test_search_matches_substrings_case_insensitively() {
        assert_eq!(
            search("MODE"),
            vec![
                "Spherical Mode",
                "Irregular Mode",
                "Model Architecture",
                "Fine-tuning Models"
            ]
        );
        assert_eq!(search("  ").len(), 18);
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn test_section_of_nested_page() {
        assert_eq!(section_of("Spherical Mode"), Some("Core Concepts"));
        assert_eq!(section_of("FAQ"), Some("Troubleshooting"));
        assert_eq!(section_of("Nope"), None);
    }
}
