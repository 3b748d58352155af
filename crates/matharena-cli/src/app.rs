//! Terminal rendering of the pages and the router loop.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use matharena_core::model::{SignInForm, SignUpForm};
use matharena_core::pages::{home, login, register, HomePage, HomeView, LoginPage, RegisterPage};
use matharena_core::timer;
use matharena_core::{ArenaApi, Navigation, Route, SessionContext};

use crate::input::Input;

/// Typed at the username prompt of the register page to switch to login.
const LOGIN_SHORTCUT: &str = ":login";

/// Ends the game early when typed instead of an answer.
const FINISH_COMMANDS: [&str; 3] = ["q", "quit", ":finish"];

pub struct App {
    api: Arc<dyn ArenaApi>,
    ctx: SessionContext,
    input: Input,
}

/// How a running game handed control back.
enum PlayOutcome {
    /// The game ended on the page; keep rendering it.
    Ended,
    Navigate(Navigation),
}

impl App {
    pub fn new(api: Arc<dyn ArenaApi>, ctx: SessionContext, input: Input) -> Self {
        Self { api, ctx, input }
    }

    /// Show `start` and follow navigations until the user leaves or input
    /// runs out.
    pub async fn run(&mut self, start: Route) -> Result<()> {
        let mut route = start;
        loop {
            debug!(%route, "mounting page");
            let navigation = match route {
                Route::Register => self.register().await?,
                Route::Login => self.login().await?,
                Route::Home => self.home().await?,
            };

            let Some(navigation) = navigation else {
                return Ok(());
            };
            tokio::time::sleep(navigation.delay()).await;
            route = match navigation {
                Navigation::Redirect { to, .. } => to,
                Navigation::Reload { .. } => route,
            };
        }
    }

    async fn register(&mut self) -> Result<Option<Navigation>> {
        let mut page = RegisterPage::new();
        println!("\n== Register ==");

        loop {
            if let Some(error) = page.error() {
                println!("Error: {error}");
            }

            let Some(username) = self
                .input
                .prompt(&format!("Username ({LOGIN_SHORTCUT} to log in instead)"))
                .await?
            else {
                return Ok(None);
            };
            if username.trim() == LOGIN_SHORTCUT {
                return Ok(Some(page.go_to_login()));
            }
            let Some(email) = self.input.prompt("Email").await? else {
                return Ok(None);
            };
            let Some(password) = self.input.prompt("Password").await? else {
                return Ok(None);
            };

            let form = SignUpForm {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
            };
            println!("{}", register::LOADING_MESSAGE);
            if let Some(navigation) = page.submit(self.api.as_ref(), &form).await {
                if let Some(message) = page.success_message() {
                    println!("{message}");
                }
                return Ok(Some(navigation));
            }
        }
    }

    async fn login(&mut self) -> Result<Option<Navigation>> {
        let mut page = LoginPage::new();
        println!("\n== Log In ==");

        loop {
            if let Some(error) = page.error() {
                println!("Error: {error}");
            }

            let Some(username) = self.input.prompt("Username").await? else {
                return Ok(None);
            };
            let Some(password) = self.input.prompt("Password").await? else {
                return Ok(None);
            };

            let form = SignInForm {
                username: username.trim().to_string(),
                password,
            };
            println!("{}", login::LOADING_MESSAGE);
            if let Some(navigation) = page.submit(self.api.as_ref(), &mut self.ctx, &form).await {
                println!("Welcome back, {}!", form.username);
                return Ok(Some(navigation));
            }
        }
    }

    async fn home(&mut self) -> Result<Option<Navigation>> {
        let mut page = match HomePage::mount(&self.ctx) {
            Ok(page) => page,
            Err(navigation) => {
                println!("You are not logged in.");
                return Ok(Some(navigation));
            }
        };
        println!("\n== Welcome to the MathArena ==");

        loop {
            if let Some(error) = page.error() {
                println!("Error: {error}");
            }

            match page.view().clone() {
                HomeView::Idle => {
                    println!("[c] Create Your Math Game   [l] Log out");
                    let Some(choice) = self.input.prompt(">").await? else {
                        return Ok(None);
                    };
                    match choice.trim() {
                        "c" | "create" => {
                            println!("{}", home::CREATING_MESSAGE);
                            page.create_game(self.api.as_ref()).await;
                        }
                        "l" | "logout" => {
                            if let Some(navigation) = self.logout(&mut page) {
                                return Ok(Some(navigation));
                            }
                        }
                        _ => {}
                    }
                }
                HomeView::Playing(_) => match self.play(&mut page).await? {
                    PlayOutcome::Ended => {}
                    PlayOutcome::Navigate(navigation) => {
                        if let Some(error) = page.error() {
                            println!("Error: {error}");
                        }
                        return Ok(Some(navigation));
                    }
                },
                HomeView::GameOver { score } => {
                    println!("\nGame Over!");
                    println!("Your final score is: {score}");
                    println!("[p] Play Again   [l] Log Out");
                    let Some(choice) = self.input.prompt(">").await? else {
                        return Ok(None);
                    };
                    match choice.trim() {
                        "p" | "play" => {
                            println!("{}", home::CREATING_MESSAGE);
                            page.restart(self.api.as_ref()).await;
                        }
                        "l" | "logout" => {
                            if let Some(navigation) = self.logout(&mut page) {
                                return Ok(Some(navigation));
                            }
                        }
                        _ => {}
                    }
                }
                HomeView::Reloading => {
                    return Ok(Some(Navigation::Reload {
                        after: home::RELOAD_DELAY,
                    }))
                }
            }
        }
    }

    /// Run the game clock against the answer prompt until the game ends.
    async fn play(&mut self, page: &mut HomePage) -> Result<PlayOutcome> {
        let Self { api, input, .. } = self;
        let api = api.as_ref();
        let mut ticker = timer::ticker();
        render_card(page)?;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(navigation) = page.tick(api).await {
                        return Ok(PlayOutcome::Navigate(navigation));
                    }
                    let Some(card) = page.card() else {
                        println!("\nTime is up!");
                        return Ok(PlayOutcome::Ended);
                    };
                    let secs = card.countdown.remaining().as_secs();
                    if secs % 10 == 0 || secs <= 5 {
                        println!("\nTime Left: {}", card.time_left());
                        prompt_answer()?;
                    }
                }
                line = input.next_line() => {
                    let line = line?;
                    let finish = match line.as_deref().map(str::trim) {
                        None => true,
                        Some(command) => FINISH_COMMANDS.contains(&command),
                    };
                    if finish {
                        if let Some(navigation) = page.finish_game(api).await {
                            return Ok(PlayOutcome::Navigate(navigation));
                        }
                        return Ok(PlayOutcome::Ended);
                    }

                    page.submit_answer(api, line.as_deref().unwrap_or_default()).await;
                    if let Some(error) = page.error() {
                        println!("Error: {error}");
                    }
                    render_card(page)?;
                }
            }
        }
    }

    /// `None` when the session could not be removed; the page stays put.
    fn logout(&mut self, page: &mut HomePage) -> Option<Navigation> {
        match page.logout(&mut self.ctx) {
            Ok(navigation) => {
                println!("Logged out.");
                Some(navigation)
            }
            Err(e) => {
                println!("Error: unable to log out: {e}");
                None
            }
        }
    }
}

fn render_card(page: &HomePage) -> Result<()> {
    if let Some(card) = page.card() {
        println!();
        println!("Math Expression: {}", card.expression);
        println!("Time Left: {}", card.time_left());
        println!("Score: {}", card.score);
        prompt_answer()?;
    }
    Ok(())
}

fn prompt_answer() -> Result<()> {
    use std::io::Write;

    print!("Enter your answer (q to finish): ");
    std::io::stdout().flush()?;
    Ok(())
}
