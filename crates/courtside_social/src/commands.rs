//! Profile command executor.
//!
//! Routes command names and JSON arguments through privilege checks, the
//! confirmation workflow, and the profile ledger, returning structured JSON
//! payloads for the platform layer to render.

use crate::bot_commands::{
    BotCommandExecutor, parse_i64_arg, parse_opt_i64_arg, parse_string_arg,
};
use crate::payloads::{allocation_payload, leaderboard_payload, profile_payload};
use async_trait::async_trait;
use courtside_core::{
    Archetype, AuditSink, Customization, ProfileGateway, ProfileLedger, Stat, rank_by,
};
use courtside_error::{CommandError, CommandErrorKind, CourtsideResult};
use courtside_security::{ActorContext, ConfirmationWorkflow, PrivilegeChecker};
use serde_json::{Value as JsonValue, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// How many rows a leaderboard payload carries.
const LEADERBOARD_TOP: usize = 10;

/// Command executor over the profile ledger.
///
/// Self-service commands only ever touch the acting member's own profile;
/// `admin.*` and `confirm.*` commands require a privileged actor, and the
/// destructive pair (`admin.reset`, `admin.delete`) goes through the
/// two-phase confirmation workflow before the ledger is called.
pub struct ProfileCommandExecutor<G> {
    ledger: Arc<ProfileLedger<G>>,
    privileges: PrivilegeChecker,
    confirmations: Mutex<ConfirmationWorkflow>,
    /// Point grant applied to newly created profiles (deployment policy).
    starting_points: i64,
}

impl<G> ProfileCommandExecutor<G>
where
    G: ProfileGateway + AuditSink,
{
    /// Create an executor over the given ledger.
    pub fn new(
        ledger: Arc<ProfileLedger<G>>,
        privileges: PrivilegeChecker,
        confirmations: ConfirmationWorkflow,
        starting_points: i64,
    ) -> Self {
        Self {
            ledger,
            privileges,
            confirmations: Mutex::new(confirmations),
            starting_points,
        }
    }

    async fn create_profile(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "profile.create";
        let display_name = parse_string_arg(command, args, "display_name")?;
        let tags: Vec<String> = args
            .get("role_tags")
            .and_then(|v| v.as_array())
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| t.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        let archetype = Archetype::resolve_from_tags(&tags).ok_or_else(|| {
            CommandError::new(CommandErrorKind::InvalidArgument {
                command: command.to_string(),
                arg_name: "role_tags".to_string(),
                reason: "no qualifying position role".to_string(),
            })
        })?;

        let profile = self
            .ledger
            .create(actor.actor_id, display_name, archetype, self.starting_points)
            .await?;
        Ok(profile_payload(&profile, self.ledger.config()))
    }

    async fn view_profile(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let target = parse_opt_i64_arg("profile.view", args, "player_id")?
            .unwrap_or(actor.actor_id);
        let profile = self.ledger.get(target).await?;
        Ok(profile_payload(&profile, self.ledger.config()))
    }

    async fn allocate(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "profile.allocate";
        let stat = parse_string_arg(command, args, "stat")?;
        let points = parse_i64_arg(command, args, "points")?;

        let allocation = self.ledger.allocate(actor.actor_id, &stat, points).await?;
        let total = self.ledger.get(actor.actor_id).await?.total_stats();
        Ok(allocation_payload(&allocation, total, self.ledger.config()))
    }

    async fn customize(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "profile.customize";
        let field = parse_string_arg(command, args, "field")?;
        let value = parse_string_arg(command, args, "value")?;

        let change = match field.as_str() {
            "nom" | "character_name" => Customization::CharacterName(value),
            "prénom" | "first_name" => Customization::FirstName(value),
            "âge" | "age" => {
                let age = value.trim().parse::<i32>().map_err(|_| {
                    CommandError::new(CommandErrorKind::InvalidArgument {
                        command: command.to_string(),
                        arg_name: "value".to_string(),
                        reason: "age must be an integer".to_string(),
                    })
                })?;
                Customization::Age(age)
            }
            "image" => Customization::Image(value),
            other => {
                return Err(CommandError::new(CommandErrorKind::InvalidArgument {
                    command: command.to_string(),
                    arg_name: "field".to_string(),
                    reason: format!("unknown field '{other}'"),
                })
                .into());
            }
        };

        let profile = self.ledger.customize(actor.actor_id, change).await?;
        Ok(profile_payload(&profile, self.ledger.config()))
    }

    async fn set_color(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let color = parse_string_arg("profile.color", args, "color")?;
        let profile = self.ledger.set_color(actor.actor_id, &color).await?;
        Ok(json!({
            "color_name": color,
            "embed_color": profile.embed_color,
        }))
    }

    async fn leaderboard(&self, args: &HashMap<String, JsonValue>) -> CourtsideResult<JsonValue> {
        let command = "profile.leaderboard";
        let criterion = match args.get("stat").and_then(|v| v.as_str()) {
            Some(token) => Some(Stat::resolve(token).ok_or_else(|| {
                CommandError::new(CommandErrorKind::InvalidArgument {
                    command: command.to_string(),
                    arg_name: "stat".to_string(),
                    reason: format!("unknown statistic '{token}'"),
                })
            })?),
            None => None,
        };

        let profiles = self.ledger.list().await?;
        let ranked = match criterion {
            Some(stat) => rank_by(profiles, |p| p.stats.get(stat)),
            None => rank_by(profiles, |p| p.total_stats()),
        };
        Ok(leaderboard_payload(
            &ranked,
            criterion,
            self.ledger.config(),
            LEADERBOARD_TOP,
        ))
    }

    async fn grant_points(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "admin.grant_points";
        self.privileges.require(actor, command)?;
        let target = parse_i64_arg(command, args, "player_id")?;
        let amount = parse_i64_arg(command, args, "points")?;

        let before = self.ledger.get(target).await?.available_points;
        let profile = self.ledger.grant_points(target, amount, actor.actor_id).await?;
        Ok(json!({
            "player_id": target,
            "old_points": before,
            "new_points": profile.available_points,
            "granted": amount,
        }))
    }

    async fn set_stat(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "admin.set_stat";
        self.privileges.require(actor, command)?;
        let target = parse_i64_arg(command, args, "player_id")?;
        let stat = parse_string_arg(command, args, "stat")?;
        let value = parse_i64_arg(command, args, "value")?;

        let change = self
            .ledger
            .override_stat(target, &stat, value, actor.actor_id)
            .await?;
        Ok(json!({
            "player_id": target,
            "stat": change.stat.display_name(),
            "old_value": change.old_value,
            "new_value": change.new_value,
        }))
    }

    async fn set_physical(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "admin.set_physical";
        self.privileges.require(actor, command)?;
        let target = parse_i64_arg(command, args, "player_id")?;
        let height = parse_opt_i64_arg(command, args, "height")?.map(|h| h as i32);
        let weight = parse_opt_i64_arg(command, args, "weight")?.map(|w| w as i32);

        let profile = self
            .ledger
            .override_physical(target, height, weight, actor.actor_id)
            .await?;
        Ok(json!({
            "player_id": target,
            "height_cm": profile.height_cm,
            "weight_kg": profile.weight_kg,
        }))
    }

    /// Register a destructive request; the ledger is not touched until the
    /// returned token is confirmed.
    async fn request_destructive(
        &self,
        operation: &'static str,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        self.privileges.require(actor, operation)?;
        let target = parse_i64_arg(operation, args, "player_id")?;

        // Fail early so an admin is not asked to confirm a no-op.
        self.ledger.get(target).await?;

        let token = self
            .confirmations
            .lock()
            .await
            .request(operation, target, actor.actor_id);
        info!(operation, target, "Destructive operation pending confirmation");
        Ok(json!({
            "status": "pending_confirmation",
            "operation": operation,
            "player_id": target,
            "token": token,
        }))
    }

    async fn approve(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "confirm.approve";
        self.privileges.require(actor, command)?;
        let token = parse_string_arg(command, args, "token")?;

        let affirmed = {
            let mut confirmations = self.confirmations.lock().await;
            confirmations.confirm(&token, actor.actor_id)?;
            confirmations.take_confirmed(&token)?
        };

        let payload = match affirmed.operation.as_str() {
            "admin.reset" => {
                let profile = self
                    .ledger
                    .reset(affirmed.target_player, actor.actor_id)
                    .await?;
                json!({
                    "status": "executed",
                    "operation": "admin.reset",
                    "player_id": affirmed.target_player,
                    "total_stats": profile.total_stats(),
                    "available_points": profile.available_points,
                })
            }
            "admin.delete" => {
                self.ledger
                    .delete(affirmed.target_player, actor.actor_id)
                    .await?;
                json!({
                    "status": "executed",
                    "operation": "admin.delete",
                    "player_id": affirmed.target_player,
                })
            }
            other => {
                return Err(CommandError::new(CommandErrorKind::CommandNotFound(
                    other.to_string(),
                ))
                .into());
            }
        };
        Ok(payload)
    }

    async fn decline(
        &self,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        let command = "confirm.decline";
        self.privileges.require(actor, command)?;
        let token = parse_string_arg(command, args, "token")?;

        let mut confirmations = self.confirmations.lock().await;
        let operation = confirmations
            .get(&token)
            .map(|p| p.operation.clone())
            .unwrap_or_default();
        confirmations.decline(&token, actor.actor_id)?;
        confirmations.cleanup_expired();

        Ok(json!({
            "status": "cancelled",
            "operation": operation,
        }))
    }
}

#[async_trait]
impl<G> BotCommandExecutor for ProfileCommandExecutor<G>
where
    G: ProfileGateway + AuditSink + 'static,
{
    #[instrument(skip(self, actor, args), fields(actor_id = actor.actor_id))]
    async fn execute(
        &self,
        command: &str,
        actor: &ActorContext,
        args: &HashMap<String, JsonValue>,
    ) -> CourtsideResult<JsonValue> {
        match command {
            "profile.create" => self.create_profile(actor, args).await,
            "profile.view" => self.view_profile(actor, args).await,
            "profile.allocate" => self.allocate(actor, args).await,
            "profile.customize" => self.customize(actor, args).await,
            "profile.color" => self.set_color(actor, args).await,
            "profile.leaderboard" => self.leaderboard(args).await,
            "admin.grant_points" => self.grant_points(actor, args).await,
            "admin.set_stat" => self.set_stat(actor, args).await,
            "admin.set_physical" => self.set_physical(actor, args).await,
            "admin.reset" => self.request_destructive("admin.reset", actor, args).await,
            "admin.delete" => self.request_destructive("admin.delete", actor, args).await,
            "confirm.approve" => self.approve(actor, args).await,
            "confirm.decline" => self.decline(actor, args).await,
            other => Err(CommandError::new(CommandErrorKind::CommandNotFound(
                other.to_string(),
            ))
            .into()),
        }
    }

    fn supported_commands(&self) -> Vec<&'static str> {
        vec![
            "profile.create",
            "profile.view",
            "profile.allocate",
            "profile.customize",
            "profile.color",
            "profile.leaderboard",
            "admin.grant_points",
            "admin.set_stat",
            "admin.set_physical",
            "admin.reset",
            "admin.delete",
            "confirm.approve",
            "confirm.decline",
        ]
    }
}
