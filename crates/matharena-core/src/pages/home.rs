//! Home page: game creation, the answer loop, and finishing.
//!
//! The page moves through `Idle → Playing → GameOver` (or `Reloading` when
//! finishing fails). Only a `Playing` page can finish, and finishing leaves
//! that state before the request is sent, so one game session gets at most
//! one finish call no matter how expiry and quitting interleave.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{GameError, StoreError};
use crate::model::{GameSnapshot, SessionId, UserId};
use crate::router::{Navigation, Route};
use crate::session::SessionContext;
use crate::timer::{Countdown, Tick};
use crate::traits::ArenaApi;
use crate::validation::parse_answer;

/// Pause before the page reloads after a failed finish.
pub const RELOAD_DELAY: Duration = Duration::from_secs(2);
pub const CREATING_MESSAGE: &str = "Creating Game...";

/// The running game as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub session_id: SessionId,
    pub expression: String,
    pub score: i64,
    pub countdown: Countdown,
}

impl GameCard {
    fn start(snapshot: GameSnapshot) -> Self {
        Self {
            countdown: Countdown::from_time_left(snapshot.time_left),
            session_id: snapshot.session_id,
            expression: snapshot.expression,
            score: snapshot.score,
        }
    }

    fn refresh(&mut self, snapshot: GameSnapshot) {
        self.expression = snapshot.expression;
        self.score = snapshot.score;
        self.countdown.resync(snapshot.time_left);
    }

    /// `m:ss` left on the clock.
    pub fn time_left(&self) -> String {
        self.countdown.display()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    /// No game; offer to create one or log out.
    Idle,
    Playing(GameCard),
    /// Finished; show the final score.
    GameOver { score: i64 },
    /// Finishing failed; waiting for the reload.
    Reloading,
}

#[derive(Debug)]
pub struct HomePage {
    user_id: UserId,
    view: HomeView,
    error: Option<String>,
}

impl HomePage {
    /// Mount the page. Without a stored token the caller is sent to login.
    pub fn mount(ctx: &SessionContext) -> Result<Self, Navigation> {
        match ctx.user_id() {
            Some(user_id) if ctx.is_logged_in() => Ok(Self {
                user_id,
                view: HomeView::Idle,
                error: None,
            }),
            _ => {
                debug!("no stored token, redirecting to login");
                Err(Navigation::to(Route::Login))
            }
        }
    }

    pub fn view(&self) -> &HomeView {
        &self.view
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn card(&self) -> Option<&GameCard> {
        match &self.view {
            HomeView::Playing(card) => Some(card),
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.view, HomeView::Playing(_))
    }

    /// Start a new game session. Ignored unless the page is idle.
    pub async fn create_game(&mut self, api: &dyn ArenaApi) {
        if self.view != HomeView::Idle {
            return;
        }
        self.error = None;

        match api.create_session(self.user_id).await {
            Ok(snapshot) => {
                info!(session_id = %snapshot.session_id, time_left = ?snapshot.time_left, "game started");
                self.view = HomeView::Playing(GameCard::start(snapshot));
            }
            Err(err) => self.fail(GameError::CreateFailed(err)),
        }
    }

    /// Submit a typed answer.
    ///
    /// Blank input is ignored and non-numeric input is rejected locally.
    /// A failed submission leaves the game running.
    pub async fn submit_answer(&mut self, api: &dyn ArenaApi, input: &str) {
        let HomeView::Playing(card) = &self.view else {
            return;
        };
        let answer = match parse_answer(input) {
            Ok(Some(answer)) => answer,
            Ok(None) => return,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };
        let session_id = card.session_id.clone();

        let result = api.submit_answer(&session_id, self.user_id, answer).await;
        match (result, &mut self.view) {
            (Ok(snapshot), HomeView::Playing(card)) => {
                debug!(%session_id, score = snapshot.score, "answer accepted");
                card.refresh(snapshot);
                self.error = None;
            }
            (Ok(_), _) => {}
            (Err(err), _) => self.fail(GameError::AnswerFailed(err)),
        }
    }

    /// Advance the countdown by one second, finishing the game when it runs
    /// out.
    pub async fn tick(&mut self, api: &dyn ArenaApi) -> Option<Navigation> {
        let HomeView::Playing(card) = &mut self.view else {
            return None;
        };
        match card.countdown.tick() {
            Tick::Expired => {
                debug!(session_id = %card.session_id, "time is up");
                self.finish_game(api).await
            }
            Tick::Running(_) | Tick::Stopped => None,
        }
    }

    /// Close the running game session ("Finish Game" or timer expiry).
    ///
    /// On failure the page asks to be reloaded after `RELOAD_DELAY`.
    pub async fn finish_game(&mut self, api: &dyn ArenaApi) -> Option<Navigation> {
        let card = match std::mem::replace(&mut self.view, HomeView::Reloading) {
            HomeView::Playing(card) => card,
            other => {
                self.view = other;
                return None;
            }
        };

        match api.finish_session(&card.session_id, self.user_id).await {
            Ok(()) => {
                info!(session_id = %card.session_id, score = card.score, "game finished");
                self.view = HomeView::GameOver { score: card.score };
                None
            }
            Err(err) => {
                self.fail(GameError::FinishFailed(err));
                Some(Navigation::Reload {
                    after: RELOAD_DELAY,
                })
            }
        }
    }

    /// "Play Again": drop the finished game and start a new one.
    pub async fn restart(&mut self, api: &dyn ArenaApi) {
        if !matches!(self.view, HomeView::GameOver { .. }) {
            return;
        }
        self.view = HomeView::Idle;
        self.error = None;
        self.create_game(api).await;
    }

    /// Delete the stored session and go to login.
    pub fn logout(&mut self, ctx: &mut SessionContext) -> Result<Navigation, StoreError> {
        ctx.sign_out()?;
        self.view = HomeView::Idle;
        self.error = None;
        info!(user_id = %self.user_id, "logged out");
        Ok(Navigation::to(Route::Login))
    }

    fn fail(&mut self, err: GameError) {
        let source = std::error::Error::source(&err)
            .map(|s| s.to_string())
            .unwrap_or_default();
        warn!(error = %err, cause = %source, "game request failed");
        self.error = Some(err.to_string());
    }
}
