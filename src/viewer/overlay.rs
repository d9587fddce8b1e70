use crate::settings::{LinkButton, OverlaySettings};

#[derive(Debug, Clone, PartialEq)]
struct PageExit {
    link: String,
    elapsed: f32,
    fired: bool,
}

/// State of the link buttons drawn over the scene
#[derive(Debug, Clone)]
pub struct ButtonBar {
    buttons: Vec<LinkButton>,
    visible: bool,
    hovered: Option<usize>,
    exit: Option<PageExit>,
    exit_delay: f32,
}

impl ButtonBar {
    pub fn new(settings: &OverlaySettings) -> Self {
        Self {
            buttons: settings.buttons.clone(),
            visible: false,
            hovered: None,
            exit: None,
            exit_delay: settings.page_exit_delay,
        }
    }

    pub fn buttons(&self) -> &[LinkButton] {
        &self.buttons
    }

    pub fn reset_visibility(&mut self) {
        self.visible = false;
        self.hovered = None;
    }

    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Returns false when the hover is ignored (bar hidden or bad index)
    pub fn set_hovered(&mut self, index: usize) -> bool {
        if !self.visible || index >= self.buttons.len() {
            return false;
        }
        self.hovered = Some(index);
        true
    }

    pub fn clear_hovered(&mut self, index: usize) -> bool {
        if self.hovered != Some(index) {
            return false;
        }
        self.hovered = None;
        true
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    /// Start the page-exit fade toward the button's link
    pub fn begin_exit(&mut self, index: usize) -> bool {
        if !self.visible || self.exit.is_some() {
            return false;
        }
        let Some(button) = self.buttons.get(index) else {
            return false;
        };
        log::info!("leaving for {}", button.link);
        self.exit = Some(PageExit {
            link: button.link.clone(),
            elapsed: 0.0,
            fired: false,
        });
        true
    }

    /// Fade amount in [0, 1] while an exit is in progress
    pub fn exit_progress(&self) -> Option<f32> {
        self.exit.as_ref().map(|exit| {
            if self.exit_delay > 0.0 {
                (exit.elapsed / self.exit_delay).min(1.0)
            } else {
                1.0
            }
        })
    }

    /// Advance the exit timer; yields the link once the delay has passed
    pub fn advance(&mut self, dt: f32) -> Option<String> {
        let exit = self.exit.as_mut()?;
        if exit.fired {
            return None;
        }
        exit.elapsed += dt;
        if exit.elapsed < self.exit_delay {
            return None;
        }
        exit.fired = true;
        Some(exit.link.clone())
    }
}

/// Absolute target for a button link
pub fn resolve_link(base_url: &str, link: &str) -> String {
    if link.contains("://") || link.starts_with("mailto:") || base_url.is_empty() {
        return link.to_string();
    }
    format!("{}/{}", base_url.trim_end_matches('/'), link.trim_start_matches('/'))
}
