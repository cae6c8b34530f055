use teloxide::dispatching::dialogue::ErasedStorage;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::Bot;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{BotResult, HandlerResult};
use crate::handler::get_handler;
use crate::runtime::{ReminderWorker, WorkerPool};
use crate::service::dialogue::{model::MeasureState, DialogueService};
use crate::state::AppState;
use crate::utils::http;

pub struct BotService {
    pub bot: Bot,
    pub state: AppState,
}

impl BotService {
    pub fn new(config: AppConfig) -> BotResult<Self> {
        rust_i18n::set_locale(&config.locale);

        let client = http::create_telegram_client(config.telegram.proxy.as_deref())?;
        let bot = Bot::with_client(config.telegram.token.clone(), client);

        info!("Initializing AppState...");
        let state = AppState::new(config);
        info!("AppState initialized");

        Ok(Self { bot, state })
    }

    fn build_workers(&self) -> WorkerPool {
        let mut workers = WorkerPool::new();

        if let Some(reminder) = &self.state.config.reminder {
            info!(
                "Daily reminder for chat {} at {} ({})",
                reminder.chat_id,
                reminder.time,
                self.state.config.timezone.name()
            );
            workers.add_worker(ReminderWorker::new(self.bot.clone(), self.state.clone(), reminder.time));
        }

        workers
    }

    pub async fn start(&self) -> HandlerResult<()> {
        info!("Testing connection to Telegram API...");
        match self.bot.get_me().await {
            Ok(me) => info!("Successfully connected to Telegram API as @{}", me.username()),
            Err(e) => {
                error!("Failed to connect to Telegram API: {:?}", e);
                return Err(anyhow::anyhow!("Failed to connect to Telegram API: {}", e).into());
            }
        }

        crate::command::setup_user_commands(&self.bot).await?;

        let workers = self.build_workers();
        workers.start_all().await?;
        info!("{} background worker(s) running", workers.running());

        let storage: Arc<ErasedStorage<MeasureState>> = DialogueService::get_dialogue_storage();

        Dispatcher::builder(self.bot.clone(), get_handler())
            .dependencies(dptree::deps![storage, self.state.clone()])
            .default_handler(|update| async move {
                debug!("Unhandled update: {:?}", update.id);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        workers.stop_all();

        Ok(())
    }
}
