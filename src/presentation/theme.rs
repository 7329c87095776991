use crate::domain::chart::Theme;
use leptos::*;

/// Page-wide theme name, the way a theme provider exposes it.
#[derive(Debug, Clone, Copy)]
pub struct ThemeContext {
    name: RwSignal<Option<String>>,
}

impl ThemeContext {
    pub fn theme(&self) -> Theme {
        self.name.with(|name| Theme::from_name(name.as_deref()))
    }

    pub fn toggle(&self) {
        let next = self.name.with_untracked(|name| Theme::from_name(name.as_deref())).toggled();
        self.name.set(Some(next.as_ref().to_string()));
    }
}

pub fn provide_theme(initial: Option<&str>) -> ThemeContext {
    let context = ThemeContext { name: create_rw_signal(initial.map(str::to_string)) };
    provide_context(context);
    context
}

/// Current theme; light when no provider is mounted above.
pub fn use_theme() -> Signal<Theme> {
    let context = use_context::<ThemeContext>();
    Signal::derive(move || context.map_or(Theme::Light, |context| context.theme()))
}

/// Theme name set on `<html>` by the host page (`data-theme` or a `dark` class).
pub fn document_theme_name() -> Option<String> {
    let root = document().document_element()?;
    if let Some(name) = root.get_attribute("data-theme") {
        return Some(name);
    }
    root.class_name()
        .split_whitespace()
        .any(|class| class == "dark")
        .then(|| "dark".to_string())
}
