use std::rc::Rc;

use kiosk_engine::font::{BlockFont, Font, TrueTypeFont};

use crate::config::{Config, FontSpec};
use crate::error::Result;

/// The three faces the board draws with.
#[derive(Clone)]
pub struct Fonts {
    pub number: Rc<dyn Font>,
    pub activity: Rc<dyn Font>,
    /// Full-screen activity display.
    pub full: Rc<dyn Font>,
}

impl Fonts {
    /// Block fonts at the configured sizes, ignoring any font files.
    pub fn builtin(config: &Config) -> Self {
        let block =
            |spec: &FontSpec| -> Rc<dyn Font> { Rc::new(BlockFont::for_pixel_size(spec.size)) };
        Self {
            number: block(&config.door.number_font),
            activity: block(&config.door.activity_font),
            full: block(&config.board.full_font),
        }
    }

    pub fn load(config: &Config) -> Result<Self> {
        Ok(Self {
            number: load_font(&config.door.number_font)?,
            activity: load_font(&config.door.activity_font)?,
            full: load_font(&config.board.full_font)?,
        })
    }
}

pub fn load_font(spec: &FontSpec) -> Result<Rc<dyn Font>> {
    let font: Rc<dyn Font> = match &spec.file {
        Some(path) => Rc::new(TrueTypeFont::load(path, spec.size as f32)?),
        None => Rc::new(BlockFont::for_pixel_size(spec.size)),
    };
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn specs_without_files_use_block_font() {
        let config = Config::default();
        let fonts = Fonts::load(&config).expect("builtin fonts always load");
        assert_eq!(
            fonts.number.line_height(),
            BlockFont::for_pixel_size(260).line_height()
        );
        assert!(fonts.full.line_height() > fonts.activity.line_height());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let spec = FontSpec {
            file: Some(PathBuf::from("/no/such/font.ttf")),
            size: 40,
        };
        assert!(load_font(&spec).is_err());
    }
}
