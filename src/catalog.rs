//! Static app catalog shared by the launcher, the taskbar and the window
//! renderer.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AppCategory {
    Core,
    Wellness,
    Productivity,
    Entertainment,
    Utilities,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: AppCategory,
    /// Pinned to the taskbar.
    pub quick_launch: bool,
}

const fn app(
    id: &'static str,
    name: &'static str,
    category: AppCategory,
    quick_launch: bool,
) -> AppDescriptor {
    AppDescriptor {
        id,
        name,
        category,
        quick_launch,
    }
}

pub const CATALOG: &[AppDescriptor] = &[
    app("ei-dashboard", "EI Dashboard", AppCategory::Core, true),
    app("dna-engine", "DNA Engine", AppCategory::Core, true),
    app("vinlore-vault", "VinLore™ Memory Vaults", AppCategory::Core, true),
    app("memory-layer", "Memory Layer", AppCategory::Core, true),
    app("neural-monitor", "Neural Monitor", AppCategory::Core, true),
    app("continuum-marketplace", "CONTINUUM SYNC Marketplace", AppCategory::Core, false),
    app("sage", "Sage", AppCategory::Core, false),
    app("pulse", "Pulse™", AppCategory::Core, false),
    app("echo-sentinel", "EchoSentinel™", AppCategory::Core, false),
    app("continuum-sync", "Continuum Sync™", AppCategory::Core, false),
    app("prime-voice", "PrimeVoice™", AppCategory::Core, false),
    app("modular-personas", "Modular Personas", AppCategory::Core, false),
    app("emotion-tracker", "Emotion Tracker", AppCategory::Wellness, false),
    app("energy-optimizer", "Energy Optimizer", AppCategory::Wellness, false),
    app("focus-enhancer", "Focus Enhancer", AppCategory::Wellness, false),
    app("mindfulness-guide", "Mindfulness Guide", AppCategory::Wellness, false),
    app("mood-journal", "Mood Journal", AppCategory::Wellness, false),
    app("neural-calendar", "Neural Calendar", AppCategory::Productivity, false),
    app("smart-chat", "Smart Chat", AppCategory::Productivity, false),
    app("memory-capture", "Memory Capture", AppCategory::Productivity, false),
    app("neural-notes", "Neural Notes", AppCategory::Productivity, false),
    app("web-portal", "Web Portal", AppCategory::Productivity, false),
    app("neural-mail", "Neural Mail", AppCategory::Productivity, false),
    app("emotion-music", "Emotion Music", AppCategory::Entertainment, false),
    app("neural-games", "Neural Games", AppCategory::Entertainment, false),
    app("mood-weather", "Mood Weather", AppCategory::Entertainment, false),
    app("neural-calc", "Neural Calculator", AppCategory::Utilities, false),
];

pub fn find_app(id: &str) -> Option<&'static AppDescriptor> {
    CATALOG.iter().find(|app| app.id == id)
}

pub fn quick_apps() -> Vec<AppDescriptor> {
    CATALOG.iter().filter(|app| app.quick_launch).copied().collect()
}

/// Title used when launching `id`; ids outside the catalog keep their raw id.
pub fn launch_title(id: &str) -> String {
    find_app(id)
        .map(|app| app.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Panel component the front end mounts inside a window. Every id resolves,
/// unknown ones to [`Panel::Placeholder`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Panel {
    EiDashboard,
    DnaEngine,
    VinloreVault,
    MemoryLayer,
    NeuralMonitor,
    EmotionTracker,
    ContinuumMarketplace,
    Sage,
    Pulse,
    EchoSentinel,
    ContinuumSync,
    PrimeVoice,
    ModularPersonas,
    Placeholder,
}

impl Panel {
    pub fn resolve(id: &str) -> Panel {
        match id {
            "ei-dashboard" => Panel::EiDashboard,
            "dna-engine" => Panel::DnaEngine,
            "vinlore-vault" => Panel::VinloreVault,
            "memory-layer" => Panel::MemoryLayer,
            "neural-monitor" => Panel::NeuralMonitor,
            "emotion-tracker" => Panel::EmotionTracker,
            "continuum-marketplace" => Panel::ContinuumMarketplace,
            "sage" => Panel::Sage,
            "pulse" => Panel::Pulse,
            "echo-sentinel" => Panel::EchoSentinel,
            "continuum-sync" => Panel::ContinuumSync,
            "prime-voice" => Panel::PrimeVoice,
            "modular-personas" => Panel::ModularPersonas,
            _ => Panel::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Panel::Placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|app| app.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn taskbar_pins_five_core_apps() {
        let quick: Vec<_> = quick_apps().iter().map(|app| app.id).collect();
        assert_eq!(
            quick,
            vec![
                "ei-dashboard",
                "dna-engine",
                "vinlore-vault",
                "memory-layer",
                "neural-monitor"
            ]
        );
    }

    #[test]
    fn registered_panel_ids_resolve() {
        let registered = [
            "ei-dashboard",
            "dna-engine",
            "vinlore-vault",
            "memory-layer",
            "neural-monitor",
            "emotion-tracker",
            "continuum-marketplace",
            "sage",
            "pulse",
            "echo-sentinel",
            "continuum-sync",
            "prime-voice",
            "modular-personas",
        ];
        for id in registered {
            assert!(!Panel::resolve(id).is_placeholder(), "{id} should have a panel");
        }
    }

    #[test]
    fn unknown_and_unbuilt_ids_render_placeholder() {
        assert_eq!(Panel::resolve("zorp"), Panel::Placeholder);
        assert_eq!(Panel::resolve("neural-calc"), Panel::Placeholder);
    }

    #[test]
    fn panel_serializes_as_kebab_id() {
        let json = serde_json::to_string(&Panel::EchoSentinel).unwrap();
        assert_eq!(json, "\"echo-sentinel\"");
    }

    #[test]
    fn launch_title_falls_back_to_id() {
        assert_eq!(launch_title("memory-layer"), "Memory Layer");
        assert_eq!(launch_title("custom-panel"), "custom-panel");
    }
}
