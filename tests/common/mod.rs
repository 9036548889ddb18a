#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::Router;
use folio::AppState;
use folio_notification::{ChatChannel, ContactMail, Dispatcher, MailChannel, Secrets, ValidSecrets};

#[derive(Default)]
pub struct StubChat {
    pub fail: bool,
    pub texts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ChatChannel for StubChat {
    async fn send_message(&self, _secrets: &ValidSecrets, text: &str) -> anyhow::Result<bool> {
        self.texts.lock().unwrap().push(text.to_owned());
        if self.fail {
            anyhow::bail!("telegram unreachable");
        }
        Ok(true)
    }
}

#[derive(Default)]
pub struct StubMail {
    pub fail: bool,
    pub panic: bool,
    pub calls: AtomicUsize,
}

impl StubMail {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MailChannel for StubMail {
    async fn send_mail(&self, _secrets: &ValidSecrets, _mail: &ContactMail) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic {
            panic!("mail transport exploded");
        }
        if self.fail {
            anyhow::bail!("smtp connection refused");
        }
        Ok(())
    }
}

pub fn secrets() -> Secrets {
    Secrets {
        email_address: "owner@example.com".to_owned(),
        gmail_passkey: "passkey".to_owned(),
        telegram_bot_token: "123:abc".to_owned(),
        telegram_chat_id: "42".to_owned(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub chat: Arc<StubChat>,
    pub mail: Arc<StubMail>,
}

pub fn create_test_app(chat: StubChat, mail: StubMail, secrets: Secrets) -> TestApp {
    let chat = Arc::new(chat);
    let mail = Arc::new(mail);
    let dispatcher = Dispatcher::new(chat.clone(), mail.clone(), Arc::new(secrets));

    let router = folio::router(AppState {
        dispatcher: Arc::new(dispatcher),
    });

    TestApp { router, chat, mail }
}
