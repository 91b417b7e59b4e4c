use crate::Context;

pub mod help;
pub mod mods;
pub mod status;
pub mod topic;

pub(crate) fn get_bot_avatar(ctx: Context<'_>) -> String {
    ctx.cache().current_user().avatar_url().unwrap_or_default()
}
