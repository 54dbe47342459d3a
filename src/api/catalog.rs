//! Provider presets for OpenAI-compatible chat endpoints.
//!
//! A provider is a named base URL plus the models it serves. The table is
//! fixed at compile time; the trailing `custom` entry has empty defaults so
//! users can point the client anywhere.

/// A preset upstream API endpoint: base URL plus the models it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Stable identifier, used as the config's `provider_id`.
    pub id: &'static str,
    /// Human-readable name for settings UIs.
    pub name: &'static str,
    /// Default base URL. Empty means the user must supply one.
    pub base_url: &'static str,
    /// Models known to work with this provider. Empty for `custom`.
    pub models: &'static [&'static str],
}

const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: "deepseek",
        name: "DeepSeek",
        base_url: "https://api.deepseek.com/v1",
        models: &["deepseek-chat", "deepseek-coder"],
    },
    ProviderDescriptor {
        id: "qwen",
        name: "Qwen (Tongyi)",
        base_url: "https://dashscope.aliyuncs.com/compatible-mode/v1",
        models: &["qwen-turbo", "qwen-plus", "qwen-max", "qwen-long"],
    },
    ProviderDescriptor {
        id: "zhipu",
        name: "Zhipu ChatGLM",
        base_url: "https://open.bigmodel.cn/api/paas/v4",
        models: &["glm-4-flash", "glm-4", "glm-4-plus"],
    },
    ProviderDescriptor {
        id: "moonshot",
        name: "Moonshot Kimi",
        base_url: "https://api.moonshot.cn/v1",
        models: &["moonshot-v1-8k", "moonshot-v1-32k", "moonshot-v1-128k"],
    },
    ProviderDescriptor {
        id: "baichuan",
        name: "Baichuan",
        base_url: "https://api.baichuan-ai.com/v1",
        models: &["Baichuan2-Turbo", "Baichuan2-53B"],
    },
    ProviderDescriptor {
        id: "doubao",
        name: "ByteDance Doubao",
        base_url: "https://ark.cn-beijing.volces.com/api/v3",
        models: &[
            "doubao-seed-1-6-250615",
            "doubao-seed-1-6-flash-250715",
            "doubao-seed-1-6-thinking-250715",
        ],
    },
    ProviderDescriptor {
        id: "custom",
        name: "Custom",
        base_url: "",
        models: &[],
    },
];

/// Returns all providers in presentation order.
pub fn providers() -> &'static [ProviderDescriptor] {
    PROVIDERS
}

/// Looks up a provider by id. Unknown ids fall back to the first entry,
/// so this never fails.
pub fn provider(id: &str) -> &'static ProviderDescriptor {
    PROVIDERS.iter().find(|p| p.id == id).unwrap_or(&PROVIDERS[0])
}
