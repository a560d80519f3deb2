//! `signage application` commands

use clap::{Args, Subcommand};
use signage_core::oauth::{ApplicationQuery, AuthParams, AuthorizationDecision};
use signage_engine::commands::application::{
    authorize_request, list_applications, register_application,
};

use super::{CommandResult, Session};

#[derive(Debug, Args)]
pub struct ApplicationArgs {
    #[command(subcommand)]
    pub command: ApplicationCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationCommand {
    /// Register a client application
    Add(AddArgs),
    /// List registered applications
    List(ListArgs),
    /// Answer an authorization request for a user
    Authorize(AuthorizeArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub redirect_uri: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Substring of the application name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub start: usize,
    /// Page size; 0 lists everything
    #[arg(long, default_value_t = 10)]
    pub length: usize,
}

#[derive(Debug, Args)]
pub struct AuthorizeArgs {
    #[arg(long)]
    pub client_id: String,
    #[arg(long)]
    pub redirect_uri: String,
    #[arg(long)]
    pub user: i64,
    /// `Approve` approves; anything else denies
    #[arg(long, default_value = "Approve")]
    pub decision: String,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long = "scope")]
    pub scopes: Vec<String>,
}

pub fn execute(args: ApplicationArgs, session: &mut Session) -> CommandResult {
    match args.command {
        ApplicationCommand::Add(add) => {
            let added =
                register_application(&mut session.conn, &session.ctx, &add.name, &add.redirect_uri)?;
            println!("{}", added.message);
            println!("  client_id: {}", added.client_id);
            Ok(())
        }
        ApplicationCommand::List(list) => {
            let query = ApplicationQuery {
                name: list.name,
                start: list.start,
                length: (list.length > 0).then_some(list.length),
            };
            let page = list_applications(&session.conn, &session.ctx, &query)?;
            for row in &page.rows {
                println!("{}\t{}\t{}", row.client_id, row.name, row.redirect_uris.join(" "));
            }
            println!("total: {}", page.total);
            Ok(())
        }
        ApplicationCommand::Authorize(auth) => {
            let mut request = AuthParams::new(auth.client_id, auth.redirect_uri);
            if let Some(state) = auth.state {
                request = request.with_state(state);
            }
            request.scopes = auth.scopes;

            let decision = AuthorizationDecision::parse(&auth.decision);
            let session_ctx = session.ctx.clone().with_user_id(auth.user);
            let uri =
                authorize_request(&mut session.conn, &session_ctx, decision, auth.user, &request)?;
            println!("{}", uri);
            Ok(())
        }
    }
}
