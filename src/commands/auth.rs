//! Register, login, logout and whoami.

use clap::Args;

use civic_api::dto::request::{LoginRequest, RegisterRequest};
use civic_api::{ApiResult, CivicApi};

use crate::output::{self, OutputFormat};

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password
    #[arg(short, long)]
    pub password: String,
    /// Request an admin account
    #[arg(long)]
    pub admin: bool,
    /// Official post held by the admin
    #[arg(long)]
    pub admin_post: Option<String>,
}

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password
    #[arg(short, long)]
    pub password: String,
}

/// Register and sign in
pub async fn register(api: &CivicApi, args: &RegisterArgs, format: OutputFormat) -> ApiResult<()> {
    let session = api
        .auth
        .register(RegisterRequest {
            username: args.username.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            is_admin: args.admin,
            admin_post: args.admin_post.clone(),
        })
        .await?;
    output::print_item(&session, format);
    Ok(())
}

/// Sign in
pub async fn login(api: &CivicApi, args: &LoginArgs, format: OutputFormat) -> ApiResult<()> {
    let session = api
        .auth
        .login(LoginRequest {
            email: args.email.clone(),
            password: args.password.clone(),
        })
        .await?;
    output::print_item(&session, format);
    Ok(())
}

/// Sign out
pub async fn logout(api: &CivicApi) -> ApiResult<()> {
    api.auth.logout().await?;
    output::print_success("Signed out");
    Ok(())
}

/// Show the signed-in identity
pub async fn whoami(api: &CivicApi, format: OutputFormat) -> ApiResult<()> {
    let me = api.auth.me().await?;
    output::print_item(&me, format);
    Ok(())
}
