use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub hour_label: Color,
    pub grid_line: Color,
    pub appointment_bg: Color,
    pub appointment_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub more_indicator: Color,
    pub today: Color,
    pub status_bar: Color,
    pub notice: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub dialog_bg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            hour_label: Color::Gray,
            grid_line: Color::DarkGray,
            appointment_bg: Color::Rgb(180, 83, 9),
            appointment_fg: Color::White,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            more_indicator: Color::Yellow,
            today: Color::Green,
            status_bar: Color::White,
            notice: Color::Yellow,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            command_mode: Color::White,
            dialog_bg: Color::Black,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            hour_label: Color::Rgb(168, 153, 132),
            grid_line: Color::Rgb(80, 73, 69),
            appointment_bg: Color::Rgb(214, 93, 14),
            appointment_fg: Color::Rgb(251, 241, 199),
            selected_bg: Color::Rgb(69, 133, 136),
            selected_fg: Color::Rgb(235, 219, 178),
            more_indicator: Color::Rgb(250, 189, 47),
            today: Color::Rgb(184, 187, 38),
            status_bar: Color::Rgb(235, 219, 178),
            notice: Color::Rgb(250, 189, 47),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            command_mode: Color::Rgb(235, 219, 178),
            dialog_bg: Color::Rgb(40, 40, 40),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            hour_label: Color::Rgb(216, 222, 233),
            grid_line: Color::Rgb(76, 86, 106),
            appointment_bg: Color::Rgb(208, 135, 112),
            appointment_fg: Color::Rgb(46, 52, 64),
            selected_bg: Color::Rgb(94, 129, 172),
            selected_fg: Color::Rgb(236, 239, 244),
            more_indicator: Color::Rgb(235, 203, 139),
            today: Color::Rgb(163, 190, 140),
            status_bar: Color::Rgb(216, 222, 233),
            notice: Color::Rgb(235, 203, 139),
            help_title: Color::Rgb(136, 192, 208),
            help_section: Color::Rgb(235, 203, 139),
            command_mode: Color::Rgb(216, 222, 233),
            dialog_bg: Color::Rgb(46, 52, 64),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(139, 233, 253),
            hour_label: Color::Rgb(248, 248, 242),
            grid_line: Color::Rgb(98, 114, 164),
            appointment_bg: Color::Rgb(255, 184, 108),
            appointment_fg: Color::Rgb(40, 42, 54),
            selected_bg: Color::Rgb(189, 147, 249),
            selected_fg: Color::Rgb(40, 42, 54),
            more_indicator: Color::Rgb(241, 250, 140),
            today: Color::Rgb(80, 250, 123),
            status_bar: Color::Rgb(248, 248, 242),
            notice: Color::Rgb(241, 250, 140),
            help_title: Color::Rgb(139, 233, 253),
            help_section: Color::Rgb(241, 250, 140),
            command_mode: Color::Rgb(248, 248, 242),
            dialog_bg: Color::Rgb(40, 42, 54),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord", "dracula"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
