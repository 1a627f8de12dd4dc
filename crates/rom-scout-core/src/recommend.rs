use indexmap::IndexMap;

use crate::classify::Platform;

/// Ordered emulator settings, rendered by callers as a two-column table.
pub type RecommendationConfig = IndexMap<&'static str, String>;

/// Emulator configuration for a platform, refined by the device CPU
/// descriptor. Pure table lookup; platforms without a tuned entry get a
/// single "Unknown" emulator row rather than an empty config.
pub fn recommend(platform: Platform, cpu: &str) -> RecommendationConfig {
    let cpu = cpu.to_lowercase();
    let mut config = RecommendationConfig::new();

    match platform {
        Platform::Ps2 => {
            config.insert("Emulator", "AetherSX2".to_string());
            config.insert("Renderer", "Vulkan".to_string());
            config.insert("EE Cycle Rate", "75%".to_string());
            let gpu_threads = if cpu.contains("snapdragon") {
                "Enabled"
            } else {
                "Disabled"
            };
            config.insert("GPU Threads", gpu_threads.to_string());
        }
        // Dolphin covers both GameCube and Wii discs.
        Platform::GameCube | Platform::Wii => {
            config.insert("Emulator", "Dolphin".to_string());
            config.insert("Backend", "Vulkan".to_string());
            config.insert("Shader Compilation", "Hybrid".to_string());
        }
        Platform::Ps1 => {
            config.insert("Emulator", "DuckStation".to_string());
            config.insert("Renderer", "Vulkan".to_string());
        }
        Platform::Psp => {
            config.insert("Emulator", "PPSSPP".to_string());
            config.insert("Backend", "Vulkan".to_string());
        }
        Platform::Dreamcast | Platform::Saturn | Platform::Unknown => {
            config.insert("Emulator", "Unknown".to_string());
        }
    }

    config
}
