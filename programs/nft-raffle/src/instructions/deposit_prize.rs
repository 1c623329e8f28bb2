use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::{
    associated_token::AssociatedToken,
    metadata::Metadata,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::constants::{CONFIG_SEED, ESCROW_SEED, METADATA_SEED, RAFFLE_SEED};
use crate::custody::{check_prize, load_metadata, ProgrammablePrize};
use crate::error::RaffleError;
use crate::events::PrizeDeposited;
use crate::helpers::transfer_tokens;
use crate::state::{GlobalConfig, PrizeKind, Raffle};

/// Accounts required to escrow a standard NFT prize.
#[derive(Accounts)]
#[instruction(idx: u32)]
pub struct DepositPrize<'info> {
    /// The raffle creator, owner of the prize.
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump,
        constraint = raffle.creator == creator.key() @ RaffleError::Unauthorized,
        constraint = !raffle.is_deposited @ RaffleError::PrizeAlreadyDeposited
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    pub prize_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: metadata PDA of the prize, parsed in the handler
    #[account(
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(), prize_mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub prize_metadata: UncheckedAccount<'info>,

    /// The creator's account holding the prize.
    #[account(
        mut,
        constraint = creator_token_account.mint == prize_mint.key()
            && creator_token_account.owner == creator.key()
            && creator_token_account.amount == 1
            @ RaffleError::InvalidTokenAccount
    )]
    pub creator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The escrow's account receiving the prize.
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = prize_mint,
        associated_token::authority = escrow,
        associated_token::token_program = token_program,
    )]
    pub escrow_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
}

/// Accounts required to lock a programmable NFT prize in place.
#[derive(Accounts)]
#[instruction(idx: u32)]
pub struct DepositPrizePnft<'info> {
    /// The raffle creator, owner of the prize.
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump,
        constraint = raffle.creator == creator.key() @ RaffleError::Unauthorized,
        constraint = !raffle.is_deposited @ RaffleError::PrizeAlreadyDeposited
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// Becomes the locked-transfer delegate of the prize.
    #[account(
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    pub prize_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: metadata PDA of the prize, parsed in the handler
    #[account(
        mut,
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(), prize_mint.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub prize_metadata: UncheckedAccount<'info>,

    /// CHECK: master edition PDA of the prize
    #[account(
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(),
            prize_mint.key().as_ref(), b"edition"],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub prize_edition: UncheckedAccount<'info>,

    /// The creator's account holding the prize. The prize stays here until
    /// it is claimed.
    #[account(
        mut,
        constraint = creator_token_account.mint == prize_mint.key()
            && creator_token_account.owner == creator.key()
            && creator_token_account.amount == 1
            @ RaffleError::InvalidTokenAccount
    )]
    pub creator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: token record PDA of the creator's token account
    #[account(
        mut,
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(),
            prize_mint.key().as_ref(), b"token_record", creator_token_account.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub creator_token_record: UncheckedAccount<'info>,

    /// CHECK: instructions sysvar
    #[account(address = sysvar::instructions::ID)]
    pub sysvar_instructions: UncheckedAccount<'info>,

    /// CHECK: checked by the token metadata program
    pub authorization_rules_program: Option<UncheckedAccount<'info>>,

    /// CHECK: checked by the token metadata program
    pub authorization_rules: Option<UncheckedAccount<'info>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
}

/// Moves a standard NFT prize into escrow custody.
///
/// # Arguments
/// * `ctx` - Context holding the DepositPrize accounts
/// * `idx` - Index of the raffle
pub fn process_deposit_prize(ctx: Context<DepositPrize>, idx: u32) -> Result<()> {
    let prize_mint = ctx.accounts.prize_mint.key();
    ctx.accounts
        .raffle
        .record_deposit(prize_mint, PrizeKind::Standard)?;

    let metadata = load_metadata(&ctx.accounts.prize_metadata)?;
    check_prize(
        &ctx.accounts.global_config,
        PrizeKind::Standard,
        &prize_mint,
        &metadata.mint,
        metadata.collection.as_ref(),
        metadata.token_standard.clone(),
    )?;

    transfer_tokens(
        &ctx.accounts.creator_token_account,
        &ctx.accounts.escrow_token_account,
        &ctx.accounts.prize_mint,
        &ctx.accounts.creator,
        &ctx.accounts.token_program,
        1,
    )?;

    msg!("Prize {} escrowed for raffle {}", prize_mint, idx);
    emit!(PrizeDeposited {
        raffle_idx: idx,
        prize_mint,
        prize_kind: PrizeKind::Standard,
    });

    Ok(())
}

/// Locks a programmable NFT prize in the creator's account with the escrow
/// as its only transfer agent.
///
/// # Arguments
/// * `ctx` - Context holding the DepositPrizePnft accounts
/// * `idx` - Index of the raffle
pub fn process_deposit_prize_pnft(ctx: Context<DepositPrizePnft>, idx: u32) -> Result<()> {
    let prize_mint = ctx.accounts.prize_mint.key();
    ctx.accounts
        .raffle
        .record_deposit(prize_mint, PrizeKind::Programmable)?;

    let metadata = load_metadata(&ctx.accounts.prize_metadata)?;
    check_prize(
        &ctx.accounts.global_config,
        PrizeKind::Programmable,
        &prize_mint,
        &metadata.mint,
        metadata.collection.as_ref(),
        metadata.token_standard.clone(),
    )?;

    let raffle_key = ctx.accounts.raffle.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        ESCROW_SEED,
        raffle_key.as_ref(),
        &[ctx.accounts.raffle.escrow_bump],
    ]];

    let metadata_program = ctx.accounts.token_metadata_program.to_account_info();
    let mint = ctx.accounts.prize_mint.to_account_info();
    let metadata = ctx.accounts.prize_metadata.to_account_info();
    let edition = ctx.accounts.prize_edition.to_account_info();
    let token = ctx.accounts.creator_token_account.to_account_info();
    let creator = ctx.accounts.creator.to_account_info();
    let token_record = ctx.accounts.creator_token_record.to_account_info();
    let escrow = ctx.accounts.escrow.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let sysvar_instructions = ctx.accounts.sysvar_instructions.to_account_info();
    let token_program = ctx.accounts.token_program.to_account_info();
    let rules_program = ctx
        .accounts
        .authorization_rules_program
        .as_ref()
        .map(|a| a.to_account_info());
    let rules = ctx
        .accounts
        .authorization_rules
        .as_ref()
        .map(|a| a.to_account_info());

    let prize = ProgrammablePrize {
        metadata_program: &metadata_program,
        mint: &mint,
        metadata: &metadata,
        edition: &edition,
        token: &token,
        token_owner: &creator,
        token_record: &token_record,
        escrow: &escrow,
        system_program: &system_program,
        sysvar_instructions: &sysvar_instructions,
        spl_token_program: &token_program,
        authorization_rules_program: rules_program.as_ref(),
        authorization_rules: rules.as_ref(),
    };
    prize.lock(&creator, signer_seeds)?;

    msg!("Prize {} locked for raffle {}", prize_mint, idx);
    emit!(PrizeDeposited {
        raffle_idx: idx,
        prize_mint,
        prize_kind: PrizeKind::Programmable,
    });

    Ok(())
}
