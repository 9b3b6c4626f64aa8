use clap::Args;

use assetpro_auth::UserRole;
use assetpro_observability::LogFormat;
use assetpro_plans::SubscriptionPlan;

pub const DEFAULT_ACTOR: &str = "Jane Doe";

/// Flags shared by every command. Each one falls back to its environment
/// variable, then to a built-in default.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Subscription tier that caps the catalog size
    #[arg(long, global = true, env = "ASSETPRO_PLAN")]
    pub plan: Option<SubscriptionPlan>,

    /// Display name recorded in the audit trail
    #[arg(long, global = true, env = "ASSETPRO_ACTOR")]
    pub actor: Option<String>,

    /// Role of the acting user (admin, manager, viewer)
    #[arg(long, global = true, env = "ASSETPRO_ROLE")]
    pub role: Option<UserRole>,

    /// Log output on stderr (json or pretty)
    #[arg(long, global = true, env = "ASSETPRO_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub plan: SubscriptionPlan,
    pub actor: String,
    pub role: UserRole,
}

impl Settings {
    pub fn resolve(args: &GlobalArgs) -> Self {
        let plan = args.plan.unwrap_or_else(|| {
            tracing::warn!("ASSETPRO_PLAN not set; using starter");
            SubscriptionPlan::default()
        });

        let actor = match args.actor.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                tracing::warn!("ASSETPRO_ACTOR not set; using \"{DEFAULT_ACTOR}\"");
                DEFAULT_ACTOR.to_string()
            }
        };

        let role = args.role.unwrap_or_else(|| {
            tracing::warn!("ASSETPRO_ROLE not set; using manager");
            UserRole::Manager
        });

        Self { plan, actor, role }
    }
}
