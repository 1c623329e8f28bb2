use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::error::RaffleError;
use crate::state::GlobalConfig;

/// Accounts required to create the platform configuration.
/// The config PDA can only be set up once; later calls fail with
/// `AlreadyInitialized`.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for account creation; becomes the admin.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The GlobalConfig state account.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + GlobalConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    /// CHECK: any wallet may receive fees
    pub fee_destination: UncheckedAccount<'info>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts for admin-only changes to the platform configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// The current admin.
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.authority == authority.key() @ RaffleError::Unauthorized
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,
}

/// Creates the platform configuration with an empty whitelist and a zero
/// raffle counter.
///
/// # Arguments
/// * `ctx` - Context holding the Initialize accounts
pub fn process_initialize(ctx: Context<Initialize>) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    global_config.initialize(
        ctx.accounts.payer.key(),
        ctx.accounts.fee_destination.key(),
        ctx.bumps.global_config,
    )?;

    msg!(
        "Config initialized, authority {}, fee destination {}",
        global_config.authority,
        global_config.fee_destination
    );
    Ok(())
}

/// Replaces the admin and the fee destination in one step.
///
/// # Arguments
/// * `ctx` - Context holding the UpdateConfig accounts
/// * `new_authority` - Next admin key
/// * `fee_destination` - Wallet credited with future ticket fees
pub fn process_update_settings(
    ctx: Context<UpdateConfig>,
    new_authority: Pubkey,
    fee_destination: Pubkey,
) -> Result<()> {
    ctx.accounts
        .global_config
        .update_settings(new_authority, fee_destination);

    msg!(
        "Settings updated, authority {}, fee destination {}",
        new_authority,
        fee_destination
    );
    Ok(())
}

pub fn process_add_whitelist(ctx: Context<UpdateConfig>, collection: Pubkey) -> Result<()> {
    let slot = ctx.accounts.global_config.add_to_whitelist(collection)?;
    msg!("Whitelisted collection {} in slot {}", collection, slot);
    Ok(())
}

pub fn process_remove_whitelist(ctx: Context<UpdateConfig>, collection: Pubkey) -> Result<()> {
    let slot = ctx
        .accounts
        .global_config
        .remove_from_whitelist(&collection)?;
    msg!("Removed collection {} from slot {}", collection, slot);
    Ok(())
}
