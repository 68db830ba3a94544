//! Showcase - project filter and theme toggle.
//!
//! The project grid shows every project under `All`, otherwise the projects
//! whose topic list contains the active filter. The theme starts dark.

use serde::{Deserialize, Serialize};
use spark_signals::{signal, Signal};
use tracing::{debug, warn};

pub const FILTER_ALL: &str = "All";

pub const PROJECT_FILTERS: [&str; 6] = [FILTER_ALL, "AI", "Physics", "FEM", "PFD Simulation", "Quantum"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub tag: String,
    pub topics: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    pub fn new(title: &str, tag: &str, topics: &[&str], description: &str) -> Self {
        Self {
            title: title.to_string(),
            tag: tag.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn matches(&self, filter: &str) -> bool {
        filter == FILTER_ALL || self.topics.iter().any(|t| t == filter)
    }
}

/// The projects the portfolio ships with.
pub fn default_projects() -> Vec<Project> {
    vec![
        Project::new(
            "Bell Test: Interactive Quantum Lab",
            "Quantum",
            &["Physics", "Quantum"],
            "3D visualization of quantum entanglement with Bell inequality tests, \
             CHSH violations, and local hidden-variable models.",
        )
        .with_link("/bell-test"),
        Project::new(
            "Project Placeholder: AI Architecture Study",
            "AI",
            &["AI"],
            "Swap in your project summary, model approach, and measurable impact.",
        ),
        Project::new(
            "Project Placeholder: FEM Solver Prototype",
            "FEM",
            &["FEM", "PFD Simulation"],
            "Add details about the mesh strategy, solver performance, or validation results.",
        ),
    ]
}

// =============================================================================
// SHOWCASE
// =============================================================================

pub struct Showcase {
    projects: Vec<Project>,
    active_filter: Signal<String>,
    dark_mode: Signal<bool>,
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new(default_projects())
    }
}

impl Showcase {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            active_filter: signal(FILTER_ALL.to_string()),
            dark_mode: signal(true),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Select a filter. Names outside [`PROJECT_FILTERS`] are ignored.
    pub fn set_filter(&self, filter: &str) -> bool {
        if !PROJECT_FILTERS.contains(&filter) {
            warn!(filter, "unknown project filter ignored");
            return false;
        }
        debug!(filter, "project filter changed");
        self.active_filter.set(filter.to_string());
        true
    }

    pub fn active_filter(&self) -> String {
        self.active_filter.get()
    }

    pub fn filter_signal(&self) -> Signal<String> {
        self.active_filter.clone()
    }

    pub fn visible_projects(&self) -> Vec<&Project> {
        let filter = self.active_filter.get();
        self.projects.iter().filter(|p| p.matches(&filter)).collect()
    }

    /// Flip the theme. Returns `true` when dark mode is now on.
    pub fn toggle_theme(&self) -> bool {
        let dark = !self.dark_mode.get();
        self.dark_mode.set(dark);
        dark
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode.get()
    }

    pub fn theme_signal(&self) -> Signal<bool> {
        self.dark_mode.clone()
    }

    /// Label for the theme button: names the theme it switches to.
    pub fn theme_label(&self) -> &'static str {
        if self.dark_mode.get() {
            "Switch to Light"
        } else {
            "Switch to Dark"
        }
    }
}
