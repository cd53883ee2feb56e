//! Metro Client - interactive shell over the booking backend
//!
//! Behaves like a browser tab: every navigation loads a page, runs that
//! page's startup checks against the backend, and follows any redirect the
//! checks issue. The session cookie lives for the whole shell.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use metro_client::constants::{APP_NAME, APP_VERSION};
use metro_client::{
    format_date_time, AlertCenter, ApiClient, ApiResponse, ClientConfig, FileStore, Navigator,
    Page, PageHistory, PageRole, ReqwestTransport, Severity,
};

const HELP: &str = r#"Commands:
  open <page>              Load index, login, register, dashboard, profile or ticket
  login <user> <pass>      Sign in
  register <user> <pass>   Create an account
  passwd <old> <new>       Change password
  me                       Show the session check response
  get <endpoint>           GET any endpoint, e.g. get /stations
  health                   Backend health
  logout                   Sign out
  alerts                   Show active alerts
  help                     This text
  quit                     Exit"#;

struct Shell {
    client: ApiClient,
    page: Page,
    history: Arc<PageHistory>,
    alerts: AlertCenter,
}

impl Shell {
    /// Load a page, then follow redirects until the page settles
    async fn open(&mut self, page: Page) {
        self.enter(page).await;
        self.settle().await;
    }

    async fn settle(&mut self) {
        while let Some(next) = self.history.take_pending() {
            self.enter(next).await;
        }
    }

    async fn enter(&mut self, page: Page) {
        self.page = page;
        self.client = self.client.for_page(page.role());
        println!("-> {}", page);

        if let Some(user) = self.client.on_page_load().await {
            println!("   signed in as {}", user.username);
        }
        if page.role() == PageRole::Protected && !self.history.has_pending() {
            if let Some(user) = self.client.require_auth().await {
                let balance = user.wallet_balance.unwrap_or_default();
                println!("   wallet balance: Rs. {:.2}", balance);
            }
        }
    }

    fn report(&self, result: Result<ApiResponse, metro_client::ApiError>) -> Option<ApiResponse> {
        match result {
            Ok(resp) => {
                print_json(&resp);
                Some(resp)
            }
            Err(e) => {
                self.alerts.show_alert(e.to_string(), Severity::Error);
                println!("error: {}", e);
                None
            }
        }
    }

    /// Run one command line; returns false when the shell should exit
    async fn execute(&mut self, line: &str) -> bool {
        let args: Vec<&str> = line.split_whitespace().collect();
        match args.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => return false,
            ["help"] => println!("{}", HELP),
            ["open", page] => match page.parse::<Page>() {
                Ok(page) => self.open(page).await,
                Err(e) => println!("error: {}", e),
            },
            ["login", user, pass] => {
                let result = self.client.login(user, pass).await;
                if let Some(resp) = self.report(result) {
                    if resp.is_success() {
                        self.alerts.show_alert("Login successful", Severity::Success);
                        self.history.navigate(Page::Dashboard);
                    } else {
                        let msg = resp.error().unwrap_or("Login failed").to_string();
                        self.alerts.show_alert(msg, Severity::Error);
                    }
                }
            }
            ["register", user, pass] => {
                let result = self.client.register(user, pass).await;
                if self.report(result).is_some() {
                    self.alerts
                        .show_alert("Registered, you can sign in now", Severity::Success);
                }
            }
            ["passwd", old, new] => {
                let result = self.client.change_password(old, new).await;
                self.report(result);
            }
            ["me"] => {
                let result = self.client.get(metro_client::constants::ME_ENDPOINT).await;
                self.report(result);
            }
            ["get", endpoint] => {
                let result = self.client.get(endpoint).await;
                self.report(result);
            }
            ["health"] => match self.client.health().await {
                Ok(status) => println!("{} (v{})", status.message, status.version),
                Err(e) => println!("error: {}", e),
            },
            ["logout"] => self.client.logout().await,
            ["alerts"] => {
                for alert in self.alerts.visible() {
                    println!("[{}] {}", alert.severity, alert.message);
                }
            }
            _ => println!("unknown command, try `help`"),
        }

        self.settle().await;
        true
    }
}

fn print_json(resp: &ApiResponse) {
    let mut body = resp.body().clone();
    // Show backend timestamps the way the pages do
    for key in ["createdAt", "bookingDate", "travelDate", "timestamp"] {
        if let Some(value) = body.get(key).and_then(|v| v.as_str()) {
            let shown = format_date_time(Some(value));
            body.insert(key.to_string(), serde_json::Value::String(shown));
        }
    }
    match serde_json::to_string_pretty(&body) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{:?}", body),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "metro-client.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = ClientConfig::load().context("loading configuration")?;
    let start = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Page>().map_err(anyhow::Error::msg)?,
        None => Page::Index,
    };

    println!("{} {} - backend {}", APP_NAME, APP_VERSION, config.base_url());
    println!("Type `help` for commands.");

    let history = Arc::new(PageHistory::new());
    let transport = Arc::new(ReqwestTransport::new(&config));
    let client = ApiClient::new(
        config,
        start.role(),
        transport,
        history.clone(),
        Arc::new(FileStore::new()),
    );

    let mut shell = Shell {
        client,
        page: start,
        history,
        alerts: AlertCenter::new(),
    };
    shell.open(start).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}> ", shell.page.path().trim_end_matches(".html"));
        std::io::stdout().flush()?;

        match lines.next_line().await? {
            Some(line) => {
                if !shell.execute(&line).await {
                    break;
                }
            }
            None => break,
        }
    }

    Ok(())
}
