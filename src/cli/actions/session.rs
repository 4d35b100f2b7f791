use crate::{app::App, cli::actions::users::print_json, i18n::Locale, routes::GuardDecision};
use anyhow::{Context, Result, bail};

/// # Errors
/// Never fails; signing out an anonymous session is a no-op.
pub async fn logout(app: &App) -> Result<()> {
    app.start().await;
    app.logout();
    Ok(())
}

/// # Errors
/// Returns an error when no saved session is valid.
pub async fn whoami(app: &App) -> Result<()> {
    let state = app.start().await;
    let Some(user) = state.user() else {
        bail!("not logged in");
    };
    print_json(user)
}

/// # Errors
/// Returns an error if the choice cannot be saved.
pub fn locale(app: &App, locale: Locale) -> Result<()> {
    app.set_locale(locale).context("failed to save the locale")?;
    println!("{locale}");
    Ok(())
}

/// # Errors
/// Never fails; the guard decision is printed.
pub async fn open(app: &App, path: &str) -> Result<()> {
    app.start().await;
    match app.visit(path) {
        GuardDecision::Allow => println!("allow"),
        GuardDecision::Redirect(target) => println!("redirect {target}"),
        GuardDecision::SignOut => println!("sign-out"),
    }
    Ok(())
}
