//! Window configuration and management

use std::path::Path;

use tracing::debug;
use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, Icon, WindowAttributes};

use crate::config::WindowConfig;
use crate::error::{BootstrapError, IconError};

/// Creates window attributes from configuration
///
/// The window starts hidden; it is shown once a rendering context exists.
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated)
        .with_visible(false);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

/// Decodes an image file into a window icon
pub fn load_icon(path: &Path) -> Result<Icon, IconError> {
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    debug!(path = %path.display(), width, height, "Decoded window icon");
    Ok(Icon::from_rgba(image.into_raw(), width, height)?)
}

/// Window attributes including the configured icon, if any
pub fn window_attributes_with_icon(
    config: &WindowConfig,
) -> Result<WindowAttributes, BootstrapError> {
    let attrs = window_attributes_from_config(config);

    match &config.icon {
        Some(path) => {
            let icon = load_icon(path).map_err(|source| BootstrapError::Icon {
                path: path.clone(),
                source,
            })?;
            Ok(attrs.with_window_icon(Some(icon)))
        }
        None => Ok(attrs),
    }
}

/// Title with frame statistics appended
pub fn stats_title(base: &str, fps: f32, position: [f32; 3]) -> String {
    format!(
        "{} | {:.0} fps | pos ({:.2}, {:.2}, {:.2})",
        base, fps, position[0], position[1], position[2]
    )
}
