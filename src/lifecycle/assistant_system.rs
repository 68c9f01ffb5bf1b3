use crate::assistant::Assistant;
use crate::backend::http::build_client;
use crate::backend::{ActionBackend, HttpBackend, SimulatedActor};
use crate::chat::ChatClient;
use crate::config::AssistantConfig;
use crate::error::BackendError;
use crate::executor::ActionExecutor;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running assistant and the tasks it owns.
///
/// Backend selection:
///
/// | `offline` | `simulated_fallback` | primary | add-stock fallback | chat |
/// |---|---|---|---|---|
/// | `false` | `true` | HTTP | simulated | HTTP, then canned |
/// | `false` | `false` | HTTP | none | HTTP, then canned |
/// | `true` | any | simulated | none | canned |
///
/// ```ignore
/// let mut system = AssistantSystem::new(&AssistantConfig::load()?)?;
/// let reply = system.assistant.respond("Suma 15 kg de chocolate").await;
/// system.shutdown().await?;
/// ```
pub struct AssistantSystem {
    pub assistant: Assistant,
    handles: Vec<JoinHandle<()>>,
}

impl AssistantSystem {
    /// Spawns the simulated backend and wires the assistant. Must run inside a Tokio runtime.
    pub fn new(config: &AssistantConfig) -> Result<Self, BackendError> {
        let (actor, simulated) = SimulatedActor::new(config.channel_buffer);
        let simulated_handle = tokio::spawn(actor.run());
        let simulated: Arc<dyn ActionBackend> = Arc::new(simulated);

        let (primary, fallback, chat) = if config.offline {
            info!("Offline mode: every action is simulated");
            (simulated, None, None)
        } else {
            let client = build_client(config)?;
            let http = HttpBackend::new(client.clone(), config.api_base_url.clone());
            info!(api = http.base_url(), "Using live API");
            let fallback = config.simulated_fallback.then_some(simulated);
            let chat = ChatClient::new(client, &config.api_base_url);
            (Arc::new(http) as Arc<dyn ActionBackend>, fallback, Some(chat))
        };

        info!(
            offline = config.offline,
            fallback = fallback.is_some(),
            "Assistant started"
        );

        let executor = ActionExecutor::new(primary, fallback, config);
        Ok(Self {
            assistant: Assistant::new(executor, chat, config.history_limit),
            handles: vec![simulated_handle],
        })
    }

    /// Drops the assistant, which closes the simulated backend's inbox, then
    /// waits for the actor task to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down assistant...");
        drop(self.assistant);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Assistant shutdown complete.");
        Ok(())
    }
}
