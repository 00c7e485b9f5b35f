//! CLI runner - executes commands

use crate::cli::commands::{
    CfpAction, Cli, Commands, ListArgs, OutputFormat, PartsStructureAction, RequestAction,
    ResponseAction,
};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::output::{
    default_export_file_name, render_json, render_table, render_view, write_csv, CsvOptions,
    TableRow,
};
use crate::pagination::PaginationController;
use crate::remote::{
    Cfp, DataTransportClient, ListFetcher, Part, PartsStructure, TradeRecord, TradeRelation,
    TradeRequestInput,
};
use crate::session::Session;
use crate::types::PageName;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load config and session, run the command and print its output
    pub async fn run(&self) -> Result<()> {
        let config = AppConfig::load(self.cli.config.as_deref())?;
        let session_path = self.session_path(&config);
        debug!(path = %session_path.display(), "Opening session");
        let session = Session::open(&session_path).await?;

        let output = self.execute(&config, &session).await?;
        print!("{output}");
        Ok(())
    }

    /// Session file chosen by flag, environment or config, in that order
    pub fn session_path(&self, config: &AppConfig) -> PathBuf {
        self.cli
            .session
            .clone()
            .unwrap_or_else(|| config.session_path())
    }

    /// Run the command against an open session and return the text to print
    pub async fn execute(&self, config: &AppConfig, session: &Session) -> Result<String> {
        match &self.cli.command {
            Commands::Login { token } => self.login(config, session, token).await,
            Commands::Logout => self.logout(session).await,
            Commands::Whoami => self.whoami(config, session).await,
            Commands::Products(args) => {
                self.list::<Part>(config, session, PageName::Products, *args)
                    .await
            }
            Commands::LinkParts(args) => {
                self.list::<Part>(config, session, PageName::LinkPartsCandidates, *args)
                    .await
            }
            Commands::Responses(args) => {
                self.list::<TradeRecord>(config, session, PageName::Responses, *args)
                    .await
            }
            Commands::Requests(args) => {
                self.list::<TradeRecord>(config, session, PageName::CfpRequestList, *args)
                    .await
            }
            Commands::PartsStructure { action } => {
                self.parts_structure(config, session, action).await
            }
            Commands::Request { action } => self.request(config, session, action).await,
            Commands::Response { action } => self.response(config, session, action).await,
            Commands::Cfp { action } => self.cfp(config, session, action).await,
            Commands::Materials { refresh } => self.materials(config, session, *refresh).await,
        }
    }

    /// Build an API client carrying the session's access token
    async fn client(&self, config: &AppConfig, session: &Session) -> Result<DataTransportClient> {
        let token = session.identity().access_token().await;
        DataTransportClient::from_config(&config.api, token.as_deref())
    }

    /// Render a value according to the selected format
    fn render<T: Serialize + ?Sized>(&self, value: &T, table: impl FnOnce() -> String) -> Result<String> {
        match self.cli.format {
            OutputFormat::Json => Ok(render_json(value)? + "\n"),
            OutputFormat::Table => Ok(table()),
        }
    }

    // ========================================================================
    // Identity
    // ========================================================================

    async fn login(&self, config: &AppConfig, session: &Session, token: &str) -> Result<String> {
        let client = DataTransportClient::from_config(&config.api, Some(token))?;
        let operator = client.operator_info().await?;
        session
            .identity()
            .login(&operator.operator_id, token)
            .await?;
        info!(operator_id = %operator.operator_id, "Logged in");

        self.render(&operator, || {
            format!("Logged in as operator {}\n", operator.operator_id)
        })
    }

    async fn logout(&self, session: &Session) -> Result<String> {
        session.identity().logout().await?;
        info!("Logged out");
        self.render(&json!({ "loggedIn": false }), || "Logged out\n".to_string())
    }

    async fn whoami(&self, config: &AppConfig, session: &Session) -> Result<String> {
        // Fail fast without a network call when nobody is logged in
        session.identity().operator_id().await?;
        let operator = self.client(config, session).await?.operator_info().await?;
        self.render(&operator, || render_table(std::slice::from_ref(&operator)))
    }

    // ========================================================================
    // List views
    // ========================================================================

    /// Show one page of a list view
    ///
    /// Each invocation mounts the view at its stored position. `--next` then
    /// moves one page forward and `--first` starts over from page 1.
    async fn list<T>(
        &self,
        config: &AppConfig,
        session: &Session,
        page: PageName,
        args: ListArgs,
    ) -> Result<String>
    where
        T: TableRow + Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let operator_id = session.identity().operator_id().await?;
        let client = self.client(config, session).await?;
        let fetcher: ListFetcher<T> = ListFetcher::new(client, page, operator_id);
        let controller = PaginationController::new(page, fetcher, session.histories());

        let outcome = if args.first {
            controller.reset().await?
        } else {
            let mounted = controller.mount().await?;
            if args.next && mounted.is_committed() {
                match controller.advance().await? {
                    Some(outcome) => outcome,
                    None => {
                        info!(page = %page, "Already on the last page");
                        mounted
                    }
                }
            } else {
                mounted
            }
        };
        debug!(page = %page, ?outcome, "List cycle finished");

        let view = controller.view().await;
        controller.unmount().await;

        if !outcome.is_committed() {
            return Err(Error::Other(format!("Loading {page} was interrupted")));
        }
        self.render(&view, || render_view(&view))
    }

    // ========================================================================
    // Parts structure
    // ========================================================================

    async fn parts_structure(
        &self,
        config: &AppConfig,
        session: &Session,
        action: &PartsStructureAction,
    ) -> Result<String> {
        let client = self.client(config, session).await?;
        let structure = match action {
            PartsStructureAction::Show { trace_id } => client.parts_structure(trace_id).await?,
            PartsStructureAction::Register { file } => {
                let input: PartsStructure = read_json_file(file).await?;
                client.register_parts_structure(&input).await?
            }
        };

        self.render(&structure, || {
            let mut out = render_table(std::slice::from_ref(&structure.parent_part));
            let _ = write!(out, "\nComponents\n{}", render_table(&structure.children_parts));
            out
        })
    }

    // ========================================================================
    // Trades
    // ========================================================================

    async fn request(
        &self,
        config: &AppConfig,
        session: &Session,
        action: &RequestAction,
    ) -> Result<String> {
        let RequestAction::Submit {
            trace_id,
            upstream_operator_id,
            message,
        } = action;

        let client = self.client(config, session).await?;
        let relations = client
            .submit_trade_requests(&[TradeRequestInput {
                downstream_trace_id: trace_id.clone(),
                upstream_operator_id: upstream_operator_id.clone(),
                message: message.clone(),
            }])
            .await?;

        self.render(&relations, || describe_relations("Requested", &relations))
    }

    async fn response(
        &self,
        config: &AppConfig,
        session: &Session,
        action: &ResponseAction,
    ) -> Result<String> {
        let ResponseAction::Link { trade_id, trace_id } = action;

        let operator_id = session.identity().operator_id().await?;
        let client = self.client(config, session).await?;
        let relation = client
            .link_trade_response(&operator_id, trade_id, trace_id)
            .await?;

        self.render(&relation, || {
            describe_relations("Linked", std::slice::from_ref(&relation))
        })
    }

    // ========================================================================
    // CFP
    // ========================================================================

    async fn cfp(&self, config: &AppConfig, session: &Session, action: &CfpAction) -> Result<String> {
        let client = self.client(config, session).await?;
        match action {
            CfpAction::Show { trace_ids } => {
                let values = client.cfp(trace_ids).await?;
                self.render(&values, || render_table(&values))
            }
            CfpAction::Register { file } => {
                let input: Vec<Cfp> = read_json_file(file).await?;
                let values = client.register_cfp(&input).await?;
                self.render(&values, || render_table(&values))
            }
            CfpAction::Export {
                trace_ids,
                output,
                bom,
            } => {
                let values = client.cfp(trace_ids).await?;
                let path = output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(default_export_file_name(chrono::Local::now())));
                let rows = write_csv(&path, &values, CsvOptions { bom: *bom }).await?;

                self.render(
                    &json!({ "path": path.display().to_string(), "rows": rows }),
                    || format!("Exported {rows} rows to {}\n", path.display()),
                )
            }
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    async fn materials(&self, config: &AppConfig, session: &Session, refresh: bool) -> Result<String> {
        let cache = session.cache();
        if refresh {
            cache.invalidate_material_names().await?;
        }

        let client = self.client(config, session).await?;
        let names = cache
            .material_names(|| async move { client.material_names().await })
            .await?;

        self.render(&names, || {
            if names.is_empty() {
                return format!("{}\n", crate::output::EMPTY_STATE);
            }
            names.iter().map(|n| format!("{n}\n")).collect()
        })
    }
}

/// Read and parse a JSON input file
async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::input(format!("Failed to read input file '{}': {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::input(format!("Failed to parse input file '{}': {e}", path.display()))
    })
}

fn describe_relations(verb: &str, relations: &[TradeRelation]) -> String {
    relations
        .iter()
        .map(|r| {
            format!(
                "{verb} trade {}: {} -> {}\n",
                r.trade_id.as_deref().unwrap_or("-"),
                r.downstream_trace_id,
                r.upstream_operator_id
            )
        })
        .collect()
}
