use serde::{Deserialize, Serialize};

/// Achievement identifiers, also the keys of the persisted snapshot.
pub mod ids {
    pub const FIRST_MESSAGE: &str = "firstMessage";
    pub const PICTOGRAM_MASTER: &str = "pictogramMaster";
    pub const SOCIAL_BUTTERFLY: &str = "socialButterfly";
    pub const SPEED_TYPER: &str = "speedTyper";
}

/// One gamification flag.
///
/// Achievements with a `target` unlock automatically once `progress`
/// reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

impl Achievement {
    fn flag(id: &str, title: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
            progress: None,
            target: None,
        }
    }

    fn counter(id: &str, title: &str, description: &str, icon: &str, target: u32) -> Self {
        Self {
            progress: Some(0),
            target: Some(target),
            ..Self::flag(id, title, description, icon)
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress.unwrap_or(0)
    }

    pub fn target_reached(&self) -> bool {
        self.target.is_some_and(|target| self.progress() >= target)
    }

    /// `"✅ 💬 title"` or `"⏳ 🎨 title (3/10)"`.
    pub fn summary_line(&self) -> String {
        let status = if self.unlocked { "✅" } else { "⏳" };
        let progress = self
            .target
            .map(|target| format!(" ({}/{})", self.progress(), target))
            .unwrap_or_default();
        format!("{status} {} {}{progress}", self.icon, self.title)
    }
}

/// The built-in achievements, in display order.
pub fn default_catalog() -> Vec<Achievement> {
    vec![
        Achievement::flag(
            ids::FIRST_MESSAGE,
            "¡Primer Mensaje!",
            "Enviaste tu primer mensaje",
            "💬",
        ),
        Achievement::counter(
            ids::PICTOGRAM_MASTER,
            "Maestro de Pictogramas",
            "Usaste 10 pictogramas diferentes",
            "🎨",
            10,
        ),
        Achievement::counter(
            ids::SOCIAL_BUTTERFLY,
            "Mariposa Social",
            "Chateaste con 3 amigos diferentes",
            "🦋",
            3,
        ),
        Achievement::counter(
            ids::SPEED_TYPER,
            "Escritor Veloz",
            "Enviaste 5 mensajes en menos de 1 minuto",
            "⚡",
            5,
        ),
    ]
}
