use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Invalid signer")]
    InvalidSigner,

    #[msg("Buyer id is bound to another wallet")]
    InvalidWallet,

    #[msg("Invalid owner")]
    InvalidOwner,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Invalid buyer id")]
    InvalidUUID,

    #[msg("Invalid date")]
    InvalidDate,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid pubkey")]
    InvalidPubkey,

    #[msg("Invalid mint")]
    InvalidMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Invalid token standard")]
    InvalidTokenStandard,

    #[msg("Token balance not enough")]
    InsufficientBalance,

    #[msg("Raffle not started")]
    RaffleNotStarted,

    #[msg("Raffle has expired")]
    RaffleExpired,

    #[msg("Raffle not ended")]
    RaffleNotEnded,

    #[msg("Raffle already withdrawn")]
    RaffleAlreadyWithdrawn,

    #[msg("Prize not deposited")]
    PrizeNotDeposited,

    #[msg("Prize already deposited")]
    PrizeAlreadyDeposited,

    #[msg("Prize already claimed")]
    PrizeAlreadyClaimed,

    #[msg("Winner not revealed")]
    WinnerNotRevealed,

    #[msg("Winner not matched")]
    WinnerNotMatched,

    #[msg("Winner already revealed")]
    WinnerAlreadyRevealed,

    #[msg("No tickets sold")]
    NoTicketsSold,

    #[msg("Total supply limit exceeded")]
    SupplyLimitExceed,

    #[msg("Wallet supply limit exceeded")]
    WalletLimitExceed,

    #[msg("Whitelist is full")]
    WhitelistFull,

    #[msg("Collection already whitelisted")]
    DuplicateEntry,

    #[msg("Collection not whitelisted")]
    NotFound,

    #[msg("Numeric overflow")]
    NumericOverflow,

    #[msg("Uninitialized account")]
    UninitializedAccount,

    #[msg("Invalid collection")]
    InvalidCollection,

    #[msg("Bad metadata")]
    BadMetadata,

    #[msg("Invalid raffle index")]
    InvalidRaffleIdx,

    #[msg("Config already initialized")]
    AlreadyInitialized,
}
