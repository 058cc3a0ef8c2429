//! Named styles for the editor's visual components

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};
use strum::{Display, EnumString};

/// Every styled element of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    RowBorder,
    RowBorderFocused,
    RoleUser,
    RoleAssistant,
    RoleSystem,
    FocusedField,
    Content,
    Placeholder,
    DeleteAction,
    ErrorText,
    ChoicesText,
    AddButton,
    StatusBar,
    StatusDisabled,
    StatusModified,
    DisabledText,
}

/// Built-in theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    Default,
    Light,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    styles: HashMap<Component, Style>,
    background: Option<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Look up a built-in theme; unknown names yield `None`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.parse::<ThemeName>().ok()? {
            ThemeName::Default => Some(Self::dark()),
            ThemeName::Light => Some(Self::light()),
        }
    }

    pub fn style(&self, component: Component) -> Style {
        self.styles.get(&component).copied().unwrap_or_default()
    }

    pub fn get_background_color(&self) -> Option<Color> {
        self.background
    }

    fn dark() -> Self {
        let styles = HashMap::from([
            (Component::RowBorder, Style::default().fg(Color::DarkGray)),
            (Component::RowBorderFocused, Style::default().fg(Color::Cyan)),
            (
                Component::RoleUser,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            (
                Component::RoleAssistant,
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            (
                Component::RoleSystem,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            (
                Component::FocusedField,
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            (Component::Content, Style::default().fg(Color::White)),
            (
                Component::Placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            (Component::DeleteAction, Style::default().fg(Color::Red)),
            (Component::ErrorText, Style::default().fg(Color::LightRed)),
            (
                Component::ChoicesText,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            (Component::AddButton, Style::default().fg(Color::Cyan)),
            (Component::StatusBar, Style::default().fg(Color::Gray)),
            (
                Component::StatusDisabled,
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            (
                Component::StatusModified,
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            (Component::DisabledText, Style::default().fg(Color::DarkGray)),
        ]);

        Self {
            name: ThemeName::Default.to_string(),
            styles,
            background: None,
        }
    }

    fn light() -> Self {
        let mut theme = Self::dark();
        theme.name = ThemeName::Light.to_string();
        theme.background = Some(Color::White);
        theme.styles.extend([
            (Component::RowBorder, Style::default().fg(Color::Gray)),
            (Component::RowBorderFocused, Style::default().fg(Color::Blue)),
            (
                Component::RoleUser,
                Style::default()
                    .fg(Color::Rgb(0, 110, 0))
                    .add_modifier(Modifier::BOLD),
            ),
            (
                Component::RoleAssistant,
                Style::default()
                    .fg(Color::Rgb(130, 0, 130))
                    .add_modifier(Modifier::BOLD),
            ),
            (Component::Content, Style::default().fg(Color::Black)),
            (Component::StatusBar, Style::default().fg(Color::DarkGray)),
            (Component::AddButton, Style::default().fg(Color::Blue)),
        ]);
        theme
    }
}
