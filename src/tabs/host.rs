use ratatui::layout::Size;

use crate::model::Icon;
use crate::util::unicode::display_width;

use super::placement::FormFactor;

/// Capabilities the bar needs from the toolkit hosting it.
///
/// Text measurement and the device class belong to the host; the bar only asks.
pub trait Host {
    /// Width of `text` in layout units
    fn text_width(&self, text: &str) -> u16;

    fn icon_size(&self, icon: &Icon) -> Size;

    fn form_factor(&self) -> FormFactor;
}

/// Terminal host: one layout unit is one cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalHost {
    pub form_factor: FormFactor,
}

impl TerminalHost {
    pub fn new(form_factor: FormFactor) -> Self {
        TerminalHost { form_factor }
    }
}

impl Host for TerminalHost {
    fn text_width(&self, text: &str) -> u16 {
        u16::try_from(display_width(text)).unwrap_or(u16::MAX)
    }

    fn icon_size(&self, icon: &Icon) -> Size {
        Size::new(self.text_width(icon.glyph()), 1)
    }

    fn form_factor(&self) -> FormFactor {
        self.form_factor
    }
}
