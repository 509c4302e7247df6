//! Line-oriented terminal driver
//!
//! Renders whichever screen the session is on and feeds typed lines to the
//! matching form. The resend countdown ticks once per second alongside input,
//! including while a gateway call started by that input is still pending.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Interval, MissedTickBehavior};

use rv_core::{
    AuthError, LoginForm, OtpForm, OtpGatewayTrait, Screen, Session, SessionStateMachine,
};

const HELP: &str = "\
Commands:
  <digits>        phone number on the login screen, code on the OTP screen
  resend          request a new code once the countdown has run out
  back            return from the OTP screen to the login screen
  logout          sign out from any screen
  open <path>     follow a link to login, otp or home
  help            show this text
  quit            leave the shell";

pub struct Shell<G: OtpGatewayTrait + ?Sized> {
    machine: SessionStateMachine<G>,
    login_form: LoginForm,
    otp_form: Option<OtpForm>,
    /// Bumped whenever the OTP form is replaced or its countdown restarts
    form_epoch: u64,
    resend_countdown_secs: u32,
}

/// What the loop should do after a line has been handled
enum Flow {
    Continue,
    Quit,
}

impl<G: OtpGatewayTrait + ?Sized> Shell<G> {
    pub fn new(machine: SessionStateMachine<G>, resend_countdown_secs: u32) -> Self {
        Self {
            machine,
            login_form: LoginForm::new(),
            otp_form: None,
            form_epoch: 0,
            resend_countdown_secs,
        }
    }

    /// Run until stdin closes or the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tick_interval();

        println!("Welcome to RydrVault. Type 'help' for commands.");
        self.render();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    if let Flow::Quit = self.dispatch(line.trim(), &mut ticker).await {
                        break;
                    }
                    self.render();
                }
                _ = ticker.tick() => self.tick(),
            }
        }

        self.machine.logout();
        println!("Goodbye.");
        Ok(())
    }

    /// Handle one line while the ticker keeps counting
    ///
    /// Seconds that pass during the call are applied once it returns, unless
    /// the call replaced the form or restarted its countdown.
    async fn dispatch(&mut self, line: &str, ticker: &mut Interval) -> Flow {
        let epoch = self.form_epoch;
        let mut elapsed = 0u32;

        let flow = {
            let handler = self.handle(line);
            tokio::pin!(handler);
            loop {
                tokio::select! {
                    biased;
                    _ = ticker.tick() => elapsed += 1,
                    flow = &mut handler => break flow,
                }
            }
        };

        if self.form_epoch == epoch {
            for _ in 0..elapsed {
                self.tick();
            }
        }
        flow
    }

    fn screen(&self) -> Screen {
        Screen::for_session(&self.machine.snapshot())
    }

    fn tick(&mut self) {
        if let Some(form) = self.otp_form.as_mut() {
            let was_counting = !form.timer().can_resend();
            form.tick();
            if was_counting && form.timer().can_resend() {
                println!("\nYou can now request a new code with 'resend'.");
                self.render();
            }
        }
    }

    async fn handle(&mut self, line: &str) -> Flow {
        match line {
            "quit" | "exit" => return Flow::Quit,
            "help" => println!("{}", HELP),
            "logout" => {
                self.machine.logout();
                self.leave_otp();
                self.login_form = LoginForm::new();
                println!("Signed out.");
            }
            _ => {
                if let Some(path) = line.strip_prefix("open ") {
                    self.open(path.trim());
                } else {
                    match self.screen() {
                        Screen::Login => self.on_login(line).await,
                        Screen::Otp => self.on_otp(line).await,
                        Screen::Home => println!("Nothing to do here yet. Try 'logout'."),
                    }
                }
            }
        }
        Flow::Continue
    }

    fn open(&self, path: &str) {
        let requested = Screen::from_path(path);
        let landed = Screen::resolve_link(path, &self.machine.snapshot());
        if requested == Some(landed) {
            println!("Already on {}.", landed.path());
        } else {
            println!("Cannot open '{}' from here; staying on {}.", path, landed.path());
        }
    }

    async fn on_login(&mut self, line: &str) {
        self.login_form.set_input(line);
        if let Some(echo) = self.login_echo() {
            println!("{}", echo);
        }
        match self.login_form.submit(&self.machine).await {
            Ok(session) => self.enter_otp(&session),
            Err(err) => report(&err),
        }
    }

    async fn on_otp(&mut self, line: &str) {
        let machine = &self.machine;
        let Some(form) = self.otp_form.as_mut() else {
            // session moved to the OTP screen without the shell noticing
            let session = machine.snapshot();
            self.enter_otp(&session);
            return;
        };

        match line {
            "back" => match machine.go_back() {
                Ok(_) => self.leave_otp(),
                Err(err) => report(&err),
            },
            "resend" => match form.resend(machine).await {
                Ok(_) => {
                    self.form_epoch += 1;
                    println!("A new code is on its way to {}.", form.destination());
                }
                Err(err) => report(&err),
            },
            code => {
                form.set_input(code);
                match form.submit(machine).await {
                    Ok(session) => {
                        self.leave_otp();
                        welcome(&session);
                    }
                    Err(err) => report(&err),
                }
            }
        }
    }

    fn enter_otp(&mut self, session: &Session) {
        let form = OtpForm::for_session(session, self.resend_countdown_secs);
        println!("We have sent an OTP to {}.", form.destination());
        self.otp_form = Some(form);
        self.form_epoch += 1;
    }

    fn leave_otp(&mut self) {
        self.otp_form = None;
        self.form_epoch += 1;
        self.login_form = LoginForm::new();
    }

    /// Grouped echo of a complete number, e.g. `98765 432 10`
    fn login_echo(&self) -> Option<String> {
        self.login_form
            .is_input_valid()
            .then(|| format!("Requesting an OTP for {}...", self.login_form.display_value()))
    }

    fn render(&self) {
        match self.screen() {
            Screen::Login => println!("[login] Enter your mobile number:"),
            Screen::Otp => {
                let status = self
                    .otp_form
                    .as_ref()
                    .and_then(OtpForm::resend_label)
                    .unwrap_or_else(|| "Didn't get it? Type 'resend'".to_string());
                println!("[otp] Enter the 6-digit code ({}):", status);
            }
            Screen::Home => println!("[home] Browse parts or type 'logout'."),
        }
    }
}

fn welcome(session: &Session) {
    if let Some(user) = &session.user {
        println!(
            "Welcome, {} ({}).",
            user.display_name,
            user.display_phone()
        );
    }
}

fn report(err: &AuthError) {
    if err.is_retryable() {
        println!("{} You can try again.", err.user_message());
    } else {
        println!("{}", err.user_message());
    }
}

fn tick_interval() -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rv_core::SessionServiceConfig;
    use rv_infra::MockOtpGateway;

    const PHONE: &str = "9876543210";

    fn shell_with(
        login_delay: Duration,
        verify_delay: Duration,
        countdown: u32,
    ) -> (Arc<MockOtpGateway>, Shell<MockOtpGateway>) {
        let gateway = Arc::new(
            MockOtpGateway::with_delays(login_delay, verify_delay).with_strict_codes(true),
        );
        let machine = SessionStateMachine::new(gateway.clone(), SessionServiceConfig::default());
        (gateway, Shell::new(machine, countdown))
    }

    async fn started_ticker() -> Interval {
        let mut ticker = tick_interval();
        // the first tick completes immediately
        ticker.tick().await;
        ticker
    }

    fn remaining(shell: &Shell<MockOtpGateway>) -> Option<u32> {
        shell
            .otp_form
            .as_ref()
            .map(|form| form.timer().remaining_seconds())
    }

    fn wrong_code(gateway: &MockOtpGateway) -> &'static str {
        match gateway.issued_code(PHONE).as_deref() {
            Some("000000") => "111111",
            _ => "000000",
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_during_slow_verify() {
        let (gateway, mut shell) = shell_with(Duration::ZERO, Duration::from_secs(5), 30);
        let mut ticker = started_ticker().await;

        shell.dispatch(PHONE, &mut ticker).await;
        assert_eq!(shell.screen(), Screen::Otp);
        assert_eq!(remaining(&shell), Some(30));

        shell.dispatch(wrong_code(&gateway), &mut ticker).await;

        assert_eq!(shell.screen(), Screen::Otp);
        assert_eq!(remaining(&shell), Some(25));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_countdown_ignores_time_spent_sending() {
        let (gateway, mut shell) = shell_with(Duration::from_secs(3), Duration::ZERO, 2);
        let mut ticker = started_ticker().await;

        shell.dispatch(PHONE, &mut ticker).await;
        assert_eq!(remaining(&shell), Some(2));

        shell.tick();
        shell.tick();
        assert_eq!(remaining(&shell), Some(0));

        shell.dispatch("resend", &mut ticker).await;

        assert_eq!(gateway.get_message_count(), 2);
        assert_eq!(remaining(&shell), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_drops_otp_form() {
        let (_, mut shell) = shell_with(Duration::ZERO, Duration::ZERO, 30);
        let mut ticker = started_ticker().await;

        shell.dispatch(PHONE, &mut ticker).await;
        shell.dispatch("logout", &mut ticker).await;

        assert_eq!(shell.screen(), Screen::Login);
        assert!(shell.otp_form.is_none());
    }

    #[test]
    fn test_login_echo_groups_complete_numbers() {
        let (_, mut shell) = shell_with(Duration::ZERO, Duration::ZERO, 30);

        shell.login_form.set_input("98765-43210");
        assert_eq!(
            shell.login_echo().as_deref(),
            Some("Requesting an OTP for 98765 432 10...")
        );

        shell.login_form.set_input("98765");
        assert_eq!(shell.login_echo(), None);
    }
}
