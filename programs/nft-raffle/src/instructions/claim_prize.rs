use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use anchor_spl::{
    associated_token::{
        get_associated_token_address, get_associated_token_address_with_program_id,
        AssociatedToken,
    },
    metadata::Metadata,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{ESCROW_SEED, METADATA_SEED, RAFFLE_SEED, UID_LENGTH, USER_SEED};
use crate::custody::ProgrammablePrize;
use crate::error::RaffleError;
use crate::events::PrizeClaimed;
use crate::state::{PrizeKind, Raffle, UserTicket};

/// Accounts required for the winner to take a standard NFT prize out of
/// escrow.
#[derive(Accounts)]
#[instruction(idx: u32, uid: [u8; UID_LENGTH])]
pub struct ClaimPrize<'info> {
    /// The winning wallet, pays for its token account if needed.
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump,
        constraint = raffle.winner_idx > 0 @ RaffleError::WinnerNotRevealed,
        constraint = !raffle.is_claimed @ RaffleError::PrizeAlreadyClaimed,
        constraint = raffle.prize_kind == PrizeKind::Standard @ RaffleError::InvalidTokenStandard
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    /// CHECK: ticket holdings of `uid`, loaded once the winner is matched
    #[account(
        seeds = [USER_SEED, raffle.key().as_ref(), uid.as_ref()],
        bump
    )]
    pub user_ticket: UncheckedAccount<'info>,

    #[account(address = raffle.prize_mint @ RaffleError::InvalidMint)]
    pub prize_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: escrow ATA of the prize, debited by the token program
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &escrow.key(),
            &prize_mint.key(),
            &token_program.key()
        ) @ RaffleError::InvalidTokenAccount
    )]
    pub escrow_token_account: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = claimant,
        associated_token::mint = prize_mint,
        associated_token::authority = claimant,
        associated_token::token_program = token_program,
    )]
    pub claimant_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Accounts required for the winner to take a programmable NFT prize from the
/// creator's account.
#[derive(Accounts)]
#[instruction(idx: u32, uid: [u8; UID_LENGTH])]
pub struct ClaimPrizePnft<'info> {
    /// The winning wallet, pays for its token account and record.
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump,
        constraint = raffle.winner_idx > 0 @ RaffleError::WinnerNotRevealed,
        constraint = !raffle.is_claimed @ RaffleError::PrizeAlreadyClaimed,
        constraint = raffle.prize_kind == PrizeKind::Programmable
            @ RaffleError::InvalidTokenStandard
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: the raffle creator, current owner of the prize
    #[account(
        mut,
        address = raffle.creator @ RaffleError::InvalidOwner
    )]
    pub creator: UncheckedAccount<'info>,

    /// Locked-transfer delegate of the prize.
    #[account(
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    /// CHECK: ticket holdings of `uid`, loaded once the winner is matched
    #[account(
        seeds = [USER_SEED, raffle.key().as_ref(), uid.as_ref()],
        bump
    )]
    pub user_ticket: UncheckedAccount<'info>,

    #[account(address = raffle.prize_mint @ RaffleError::InvalidMint)]
    pub prize_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: metadata PDA of the prize
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

    /// CHECK: claimant ATA, created by the token metadata program if missing
    #[account(
        mut,
        address = get_associated_token_address(&claimant.key(), &prize_mint.key())
            @ RaffleError::InvalidTokenAccount
    )]
    pub claimant_token_account: UncheckedAccount<'info>,

    /// CHECK: token record PDA of the claimant's token account
    #[account(
        mut,
        seeds = [METADATA_SEED, token_metadata_program.key().as_ref(),
            prize_mint.key().as_ref(), b"token_record", claimant_token_account.key().as_ref()],
        bump,
        seeds::program = token_metadata_program.key(),
    )]
    pub claimant_token_record: UncheckedAccount<'info>,

    /// CHECK: instructions sysvar
    #[account(address = sysvar::instructions::ID)]
    pub sysvar_instructions: UncheckedAccount<'info>,

    /// CHECK: checked by the token metadata program
    pub authorization_rules_program: Option<UncheckedAccount<'info>>,

    /// CHECK: checked by the token metadata program
    pub authorization_rules: Option<UncheckedAccount<'info>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_metadata_program: Program<'info, Metadata>,
    pub system_program: Program<'info, System>,
}

/// Deserializes the holdings record of the claimed buyer id.
fn load_user_ticket(info: &AccountInfo) -> Result<UserTicket> {
    require_keys_eq!(*info.owner, crate::ID, RaffleError::UninitializedAccount);
    let data = info.try_borrow_data()?;
    UserTicket::try_deserialize(&mut &data[..])
}

/// Sends the escrowed prize of raffle `idx` to the wallet bound to the
/// winning buyer id.
///
/// # Arguments
/// * `ctx` - Context containing `ClaimPrize` accounts
/// * `idx` - Index of the raffle
/// * `uid` - Buyer id the claimant says holds the winning ticket
pub fn process_claim_prize(
    ctx: Context<ClaimPrize>,
    idx: u32,
    uid: [u8; UID_LENGTH],
) -> Result<()> {
    ctx.accounts.raffle.verify_claim(&uid, PrizeKind::Standard)?;
    load_user_ticket(&ctx.accounts.user_ticket)?.verify_owner(&ctx.accounts.claimant.key())?;
    ctx.accounts.raffle.mark_claimed()?;

    let raffle_key = ctx.accounts.raffle.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        ESCROW_SEED,
        raffle_key.as_ref(),
        &[ctx.accounts.raffle.escrow_bump],
    ]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.escrow_token_account.to_account_info(),
                mint: ctx.accounts.prize_mint.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: ctx.accounts.escrow.to_account_info(),
            },
            signer_seeds,
        ),
        1,
        ctx.accounts.prize_mint.decimals,
    )?;

    msg!(
        "Raffle {}: prize {} claimed by {}",
        idx,
        ctx.accounts.prize_mint.key(),
        ctx.accounts.claimant.key()
    );
    emit!(PrizeClaimed {
        raffle_idx: idx,
        winner: ctx.accounts.claimant.key(),
        prize_mint: ctx.accounts.prize_mint.key(),
    });

    Ok(())
}

/// Unlocks the programmable prize of raffle `idx` and transfers it from the
/// creator to the wallet bound to the winning buyer id.
///
/// # Arguments
/// * `ctx` - Context containing `ClaimPrizePnft` accounts
/// * `idx` - Index of the raffle
/// * `uid` - Buyer id the claimant says holds the winning ticket
pub fn process_claim_prize_pnft(
    ctx: Context<ClaimPrizePnft>,
    idx: u32,
    uid: [u8; UID_LENGTH],
) -> Result<()> {
    ctx.accounts.raffle.verify_claim(&uid, PrizeKind::Programmable)?;
    load_user_ticket(&ctx.accounts.user_ticket)?.verify_owner(&ctx.accounts.claimant.key())?;
    ctx.accounts.raffle.mark_claimed()?;

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

    let claimant = ctx.accounts.claimant.to_account_info();
    let destination = ctx.accounts.claimant_token_account.to_account_info();
    let destination_record = ctx.accounts.claimant_token_record.to_account_info();
    let ata_program = ctx.accounts.associated_token_program.to_account_info();

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
    prize.release(
        &claimant,
        &destination,
        &claimant,
        &destination_record,
        &ata_program,
        signer_seeds,
    )?;

    msg!(
        "Raffle {}: prize {} claimed by {}",
        idx,
        mint.key(),
        claimant.key()
    );
    emit!(PrizeClaimed {
        raffle_idx: idx,
        winner: claimant.key(),
        prize_mint: mint.key(),
    });

    Ok(())
}
