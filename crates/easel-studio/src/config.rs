use anyhow::{Context, Result, bail};
use easel_engine::coords::PixelSize;

pub const CANVAS_SIZE_VAR: &str = "EASEL_CANVAS_SIZE";
pub const DEFAULT_CANVAS_SIDE: u32 = 1024;

/// Canvas size from `EASEL_CANVAS_SIZE`, or the default.
///
/// Canvases are square: the view centers them by half their width on both axes.
pub fn canvas_size_from_env() -> Result<PixelSize> {
    match std::env::var(CANVAS_SIZE_VAR) {
        Ok(raw) => parse_canvas_size(&raw).with_context(|| format!("invalid {CANVAS_SIZE_VAR}={raw:?}")),
        Err(_) => Ok(PixelSize::square(DEFAULT_CANVAS_SIDE)?),
    }
}

/// Parses the side length of a square canvas.
pub fn parse_canvas_size(raw: &str) -> Result<PixelSize> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("expected a side length in pixels");
    }
    let side = raw.parse().with_context(|| format!("bad side length {raw:?}"))?;
    Ok(PixelSize::square(side)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_length_gives_square_canvas() {
        assert_eq!(parse_canvas_size(" 512 ").unwrap(), PixelSize::square(512).unwrap());
    }

    #[test]
    fn rectangular_sizes_are_rejected() {
        assert!(parse_canvas_size("640x480").is_err());
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(parse_canvas_size("0").is_err());
        assert!(parse_canvas_size("").is_err());
        assert!(parse_canvas_size("big").is_err());
    }
}
