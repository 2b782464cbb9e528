//! Serenity event handler for the Courtside bot.
//!
//! Translates slash-command and button interactions into executor commands
//! and renders the returned payloads as plain messages. Confirmation
//! buttons on destructive commands carry their token in the component
//! custom id.

use crate::bot_commands::BotCommandExecutor;
use courtside_error::{CourtsideError, CourtsideErrorKind, LedgerErrorKind};
use courtside_security::ActorContext;
use serenity::all::{
    ButtonStyle, Command, CommandDataOptionValue, CommandInteraction, CommandOptionType,
    ComponentInteraction, Context, EventHandler, GatewayIntents, GuildId, Interaction, Member,
    Ready, User,
};
use serenity::async_trait;
use serenity::builder::{
    CreateActionRow, CreateButton, CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Event handler routing interactions to the command executor.
pub struct CourtsideHandler {
    executor: Arc<dyn BotCommandExecutor>,
}

impl CourtsideHandler {
    /// Create a handler over the given executor.
    pub fn new(executor: Arc<dyn BotCommandExecutor>) -> Self {
        Self { executor }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
    }

    /// Map a Discord slash-command name to an executor command.
    fn map_command(name: &str) -> Option<&'static str> {
        match name {
            "create" => Some("profile.create"),
            "profile" => Some("profile.view"),
            "addstat" => Some("profile.allocate"),
            "customize" => Some("profile.customize"),
            "color" => Some("profile.color"),
            "leaderboard" => Some("profile.leaderboard"),
            "addpoints" => Some("admin.grant_points"),
            "setstat" => Some("admin.set_stat"),
            "setphysical" => Some("admin.set_physical"),
            "resetplayer" => Some("admin.reset"),
            "deleteprofile" => Some("admin.delete"),
            _ => None,
        }
    }

    /// Map a Discord option name to its executor argument name.
    fn map_option_name(name: &str) -> &str {
        match name {
            "statistique" => "stat",
            "joueur" => "player_id",
            "valeur" => "value",
            "champ" => "field",
            "couleur" => "color",
            "taille" => "height",
            "poids" => "weight",
            other => other,
        }
    }

    /// Build the acting member's context from the interaction.
    async fn actor_context(
        ctx: &Context,
        guild_id: Option<GuildId>,
        user: &User,
        member: Option<&Member>,
    ) -> ActorContext {
        let mut actor = ActorContext {
            actor_id: user.id.get() as i64,
            ..ActorContext::default()
        };

        let Some(guild_id) = guild_id else {
            return actor;
        };

        match ctx.http.get_guild(guild_id).await {
            Ok(guild) => actor.is_owner = guild.owner_id == user.id,
            Err(e) => warn!(guild_id = %guild_id, error = %e, "Failed to fetch guild for owner check"),
        }

        if let Some(member) = member {
            if let Some(permissions) = member.permissions {
                actor.is_administrator = permissions.administrator();
                actor.can_manage_guild = permissions.manage_guild();
            }
            match guild_id.roles(&ctx.http).await {
                Ok(roles) => {
                    actor.roles = member
                        .roles
                        .iter()
                        .filter_map(|id| roles.get(id).map(|r| r.name.clone()))
                        .collect();
                }
                Err(e) => {
                    warn!(guild_id = %guild_id, error = %e, "Failed to fetch guild roles");
                }
            }
        }

        actor
    }

    async fn handle_command(&self, ctx: &Context, interaction: &CommandInteraction) {
        let name = interaction.data.name.as_str();
        let Some(command) = Self::map_command(name) else {
            warn!(command = name, "Unknown slash command");
            return;
        };

        let actor = Self::actor_context(
            ctx,
            interaction.guild_id,
            &interaction.user,
            interaction.member.as_deref(),
        )
        .await;

        let mut args: HashMap<String, JsonValue> = HashMap::new();
        for option in &interaction.data.options {
            let key = Self::map_option_name(&option.name).to_string();
            let value = match &option.value {
                CommandDataOptionValue::String(s) => json!(s),
                CommandDataOptionValue::Integer(i) => json!(i),
                CommandDataOptionValue::Boolean(b) => json!(b),
                CommandDataOptionValue::User(id) => json!(id.get() as i64),
                other => {
                    warn!(option = %option.name, ?other, "Unsupported option value");
                    continue;
                }
            };
            args.insert(key, value);
        }

        if command == "profile.create" {
            args.insert("display_name".to_string(), json!(&interaction.user.name));
            args.insert("role_tags".to_string(), json!(&actor.roles));
        }

        let response = match self.executor.execute(command, &actor, &args).await {
            Ok(payload) => {
                let mut message =
                    CreateInteractionResponseMessage::new().content(render_payload(&payload));
                if let Some(token) = payload
                    .get("token")
                    .and_then(|t| t.as_str())
                    .filter(|_| payload["status"] == "pending_confirmation")
                {
                    message = message.components(vec![CreateActionRow::Buttons(vec![
                        CreateButton::new(format!("confirm:{token}"))
                            .label("Confirmer")
                            .style(ButtonStyle::Danger),
                        CreateButton::new(format!("decline:{token}"))
                            .label("Annuler")
                            .style(ButtonStyle::Secondary),
                    ])]);
                }
                message
            }
            Err(e) => {
                error!(command, error = %e, "Command execution failed");
                CreateInteractionResponseMessage::new()
                    .content(user_message(&e))
                    .ephemeral(true)
            }
        };

        if let Err(e) = interaction
            .create_response(&ctx.http, CreateInteractionResponse::Message(response))
            .await
        {
            error!(command, error = %e, "Failed to send interaction response");
        }
    }

    async fn handle_component(&self, ctx: &Context, interaction: &ComponentInteraction) {
        let custom_id = interaction.data.custom_id.as_str();
        let (command, token) = match custom_id.split_once(':') {
            Some(("confirm", token)) => ("confirm.approve", token),
            Some(("decline", token)) => ("confirm.decline", token),
            _ => {
                warn!(custom_id, "Unknown component interaction");
                return;
            }
        };

        let actor = Self::actor_context(
            ctx,
            interaction.guild_id,
            &interaction.user,
            interaction.member.as_ref(),
        )
        .await;

        let mut args = HashMap::new();
        args.insert("token".to_string(), json!(token));

        let content = match self.executor.execute(command, &actor, &args).await {
            Ok(payload) => render_payload(&payload),
            Err(e) => {
                error!(command, error = %e, "Confirmation handling failed");
                user_message(&e)
            }
        };

        let response = CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .content(content)
                .components(Vec::new()),
        );
        if let Err(e) = interaction.create_response(&ctx.http, response).await {
            error!(command, error = %e, "Failed to update confirmation message");
        }
    }

    /// Slash commands registered at startup.
    fn command_definitions() -> Vec<CreateCommand> {
        let stat_option = |required: bool| {
            CreateCommandOption::new(
                CommandOptionType::String,
                "statistique",
                "La statistique visée",
            )
            .required(required)
        };
        let player_option = CreateCommandOption::new(CommandOptionType::User, "joueur", "Le joueur ciblé");

        vec![
            CreateCommand::new("create").description("Créer votre profil de joueur"),
            CreateCommand::new("profile")
                .description("Voir votre profil ou celui d'un autre joueur")
                .add_option(player_option.clone()),
            CreateCommand::new("addstat")
                .description("Ajouter des points à une statistique")
                .add_option(stat_option(true))
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "points",
                        "Le nombre de points à ajouter",
                    )
                    .required(true),
                ),
            CreateCommand::new("customize")
                .description("Personnaliser votre profil")
                .add_option(
                    CreateCommandOption::new(CommandOptionType::String, "champ", "Le champ à modifier")
                        .required(true),
                )
                .add_option(
                    CreateCommandOption::new(CommandOptionType::String, "valeur", "La nouvelle valeur")
                        .required(true),
                ),
            CreateCommand::new("color")
                .description("Changer la couleur de votre profil")
                .add_option(
                    CreateCommandOption::new(CommandOptionType::String, "couleur", "La couleur à utiliser")
                        .required(true),
                ),
            CreateCommand::new("leaderboard")
                .description("Voir le classement des joueurs")
                .add_option(stat_option(false)),
            CreateCommand::new("addpoints")
                .description("[ADMIN] Ajouter des points à un joueur")
                .add_option(player_option.clone().required(true))
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "points",
                        "Le nombre de points à ajouter",
                    )
                    .required(true),
                ),
            CreateCommand::new("setstat")
                .description("[ADMIN] Définir la valeur d'une statistique")
                .add_option(player_option.clone().required(true))
                .add_option(stat_option(true))
                .add_option(
                    CreateCommandOption::new(CommandOptionType::Integer, "valeur", "La nouvelle valeur")
                        .required(true),
                ),
            CreateCommand::new("setphysical")
                .description("[ADMIN] Définir les caractéristiques physiques")
                .add_option(player_option.clone().required(true))
                .add_option(CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "taille",
                    "La taille en centimètres",
                ))
                .add_option(CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "poids",
                    "Le poids en kilogrammes",
                )),
            CreateCommand::new("resetplayer")
                .description("[ADMIN] Réinitialiser complètement un joueur")
                .add_option(player_option.clone().required(true)),
            CreateCommand::new("deleteprofile")
                .description("[ADMIN] Supprimer le profil d'un joueur")
                .add_option(player_option.required(true)),
        ]
    }
}

#[async_trait]
impl EventHandler for CourtsideHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(bot = %ready.user.name, guilds = ready.guilds.len(), "Bot connected");

        for definition in Self::command_definitions() {
            if let Err(e) = Command::create_global_command(&ctx.http, definition).await {
                error!(error = %e, "Failed to register slash command");
            }
        }
        info!("Slash commands registered");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.handle_command(&ctx, &command).await,
            Interaction::Component(component) => self.handle_component(&ctx, &component).await,
            _ => {}
        }
    }
}

/// Render a payload as a plain message.
///
/// Rendering stays intentionally thin; the payloads carry the data and this
/// just lines it up.
fn render_payload(payload: &JsonValue) -> String {
    // Profile card
    if let Some(stats) = payload.get("stats").and_then(|s| s.as_array()) {
        let mut lines = vec![format!(
            "🏀 **{}** — {}",
            payload["display_name"].as_str().unwrap_or_default(),
            payload["archetype"]["name"].as_str().unwrap_or_default(),
        )];
        for stat in stats {
            lines.push(format!(
                "{} **{}** : {} {}/{}",
                stat["emoji"].as_str().unwrap_or_default(),
                stat["name"].as_str().unwrap_or_default(),
                stat["bar"].as_str().unwrap_or_default(),
                stat["value"],
                stat["max"],
            ));
        }
        lines.push(format!(
            "💎 Points disponibles : {} — 🎯 Total : {}/{} — Note : {} ({})",
            payload["available_points"],
            payload["total_stats"],
            payload["total_max"],
            payload["rating"]["grade"].as_str().unwrap_or_default(),
            payload["rating"]["label"].as_str().unwrap_or_default(),
        ));
        return lines.join("\n");
    }

    // Leaderboard
    if let Some(rows) = payload.get("rows").and_then(|r| r.as_array()) {
        let mut lines = vec!["🏆 Classement".to_string()];
        for row in rows {
            lines.push(format!(
                "{}. **{}** ({}) — {}/{}",
                row["rank"],
                row["display_name"].as_str().unwrap_or_default(),
                row["archetype"].as_str().unwrap_or_default(),
                row["value"],
                row["max"],
            ));
        }
        return lines.join("\n");
    }

    // Allocation
    if payload.get("points_spent").is_some() {
        return format!(
            "✅ {} **{}** : {} → {} (+{})\n💎 Points restants : {}",
            payload["emoji"].as_str().unwrap_or_default(),
            payload["stat"].as_str().unwrap_or_default(),
            payload["old_value"],
            payload["new_value"],
            payload["points_spent"],
            payload["remaining_points"],
        );
    }

    // Destructive flow statuses
    match payload.get("status").and_then(|s| s.as_str()) {
        Some("pending_confirmation") => {
            return "⚠️ Confirmation requise — cette action est irréversible.".to_string();
        }
        Some("executed") => return "✅ Action exécutée.".to_string(),
        Some("cancelled") => return "❌ Action annulée.".to_string(),
        _ => {}
    }

    // Fallback: compact key/value dump
    payload.to_string()
}

/// User-facing message for a failed command.
///
/// Persistence faults are logged with full detail but reported generically.
fn user_message(err: &CourtsideError) -> String {
    match err.kind() {
        CourtsideErrorKind::Ledger(ledger) => match &ledger.kind {
            LedgerErrorKind::Persistence(_) => {
                "❌ Une erreur interne s'est produite.".to_string()
            }
            kind => format!("❌ {kind}"),
        },
        CourtsideErrorKind::Security(security) => format!("❌ {}", security.kind),
        CourtsideErrorKind::Command(command) => format!("❌ {}", command.kind),
        _ => "❌ Une erreur interne s'est produite.".to_string(),
    }
}
