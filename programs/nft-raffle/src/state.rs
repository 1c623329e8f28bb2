use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::native_mint;

use crate::constants::{MAX_COLLECTIONS, MAX_TICKET_SUPPLY, UID_LENGTH};
use crate::entropy::{draw_seed, EntropySource};
use crate::error::RaffleError;
use crate::utils::wallet_limit;

/// Platform-wide settings. A single PDA created once by `initialize`.
#[account]
#[derive(InitSpace)]
pub struct GlobalConfig {
    /// Admin key. Also co-signs ticket purchases and is the only key allowed
    /// to draw winners.
    pub authority: Pubkey,

    /// Wallet credited with the platform fee on every ticket sale.
    pub fee_destination: Pubkey,

    /// Number of raffles created so far. The next raffle must use this index.
    pub raffle_count: u32,

    /// Collections whose verified members may be offered as prizes.
    /// Removal clears a slot in place; other slots keep their position.
    pub whitelist: [Option<Pubkey>; MAX_COLLECTIONS],

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
}

impl GlobalConfig {
    /// Sets up a config that has never been written. An existing config is
    /// left untouched.
    pub fn initialize(
        &mut self,
        authority: Pubkey,
        fee_destination: Pubkey,
        bump: u8,
    ) -> Result<()> {
        require_keys_eq!(
            self.authority,
            Pubkey::default(),
            RaffleError::AlreadyInitialized
        );

        self.authority = authority;
        self.fee_destination = fee_destination;
        self.raffle_count = 0;
        self.whitelist = [None; MAX_COLLECTIONS];
        self.bump = bump;
        Ok(())
    }

    pub fn update_settings(&mut self, authority: Pubkey, fee_destination: Pubkey) {
        self.authority = authority;
        self.fee_destination = fee_destination;
    }

    pub fn is_whitelisted(&self, collection: &Pubkey) -> bool {
        self.whitelist.iter().any(|slot| slot.as_ref() == Some(collection))
    }

    /// Stores `collection` in the first empty slot and returns that slot.
    pub fn add_to_whitelist(&mut self, collection: Pubkey) -> Result<usize> {
        require!(
            !self.is_whitelisted(&collection),
            RaffleError::DuplicateEntry
        );

        let slot = self
            .whitelist
            .iter()
            .position(Option::is_none)
            .ok_or(RaffleError::WhitelistFull)?;
        self.whitelist[slot] = Some(collection);

        Ok(slot)
    }

    pub fn remove_from_whitelist(&mut self, collection: &Pubkey) -> Result<usize> {
        let slot = self
            .whitelist
            .iter()
            .position(|entry| entry.as_ref() == Some(collection))
            .ok_or(RaffleError::NotFound)?;
        self.whitelist[slot] = None;

        Ok(slot)
    }

    /// Consumes `idx` as the next raffle index.
    pub fn claim_raffle_idx(&mut self, idx: u32) -> Result<()> {
        require_eq!(self.raffle_count, idx, RaffleError::InvalidRaffleIdx);
        self.raffle_count = self
            .raffle_count
            .checked_add(1)
            .ok_or(RaffleError::NumericOverflow)?;
        Ok(())
    }
}

/// How the prize is held between deposit and claim.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PrizeKind {
    /// The unit sits in the escrow's token account.
    Standard,
    /// A programmable NFT left in the creator's account, locked with the
    /// escrow as its transfer delegate.
    Programmable,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RaffleTicket {
    pub uid: [u8; UID_LENGTH],
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    /// Position of this raffle in creation order, part of its PDA seeds.
    pub idx: u32,

    /// Wallet that created the raffle, deposits the prize and withdraws the
    /// proceeds.
    pub creator: Pubkey,

    /// Mint tickets are paid in. The native mint means plain lamports.
    pub payment_mint: Pubkey,

    /// Prize mint, set on deposit.
    pub prize_mint: Pubkey,

    /// Custody mode chosen on deposit; the claim must use the same one.
    pub prize_kind: PrizeKind,

    /// Price of one ticket in the payment asset's base units.
    pub price: u64,

    pub total_supply: u32,
    pub total_sold: u32,

    /// 1-based index into `tickets`; `0` until the winner is drawn.
    pub winner_idx: u32,

    /// UNIX timestamps (seconds) bounding the sale, both inclusive.
    pub start_time: i64,
    pub end_time: i64,

    pub is_deposited: bool,
    pub is_claimed: bool,
    pub is_withdrawn: bool,

    pub bump: u8,
    pub escrow_bump: u8,

    /// One entry per sold ticket in purchase order. The account is allocated
    /// for `total_supply` entries up front, see [`Raffle::space`].
    #[max_len(0)]
    pub tickets: Vec<RaffleTicket>,
}

impl Raffle {
    /// Account size, discriminator included, for a raffle of `total_supply`
    /// tickets.
    pub fn space(total_supply: u32) -> usize {
        8 + Self::INIT_SPACE + total_supply as usize * RaffleTicket::INIT_SPACE
    }

    pub fn validate_terms(total_supply: u32, start_time: i64, end_time: i64) -> Result<()> {
        require!(start_time < end_time, RaffleError::InvalidDate);
        require!(
            total_supply > 0 && total_supply <= MAX_TICKET_SUPPLY,
            RaffleError::InvalidAmount
        );
        Ok(())
    }

    pub fn is_native_payment(&self) -> bool {
        self.payment_mint == native_mint::ID
    }

    pub fn has_ended(&self, now: i64) -> bool {
        now > self.end_time
    }

    pub fn record_deposit(&mut self, mint: Pubkey, kind: PrizeKind) -> Result<()> {
        require!(!self.is_deposited, RaffleError::PrizeAlreadyDeposited);
        self.prize_mint = mint;
        self.prize_kind = kind;
        self.is_deposited = true;
        Ok(())
    }

    /// Checks that `amount` tickets can be sold at `now`.
    pub fn check_sale_open(&self, now: i64, amount: u32) -> Result<()> {
        require!(now >= self.start_time, RaffleError::RaffleNotStarted);
        require!(now <= self.end_time, RaffleError::RaffleExpired);
        require!(self.is_deposited, RaffleError::PrizeNotDeposited);
        require!(amount > 0, RaffleError::InvalidAmount);

        let total_sold = self
            .total_sold
            .checked_add(amount)
            .ok_or(RaffleError::NumericOverflow)?;
        require!(
            total_sold <= self.total_supply,
            RaffleError::SupplyLimitExceed
        );
        Ok(())
    }

    pub fn wallet_limit(&self) -> Result<u32> {
        wallet_limit(self.total_supply)
    }

    /// Appends `amount` tickets for `uid`. Oversubscription is rejected, never
    /// clamped.
    pub fn record_purchase(&mut self, uid: [u8; UID_LENGTH], amount: u32) -> Result<()> {
        let total_sold = self
            .total_sold
            .checked_add(amount)
            .ok_or(RaffleError::NumericOverflow)?;
        require!(
            total_sold <= self.total_supply,
            RaffleError::SupplyLimitExceed
        );

        self.tickets
            .extend((0..amount).map(|_| RaffleTicket { uid }));
        self.total_sold = total_sold;
        Ok(())
    }

    /// Draws the winning ticket once the sale is over. Returns the 1-based
    /// winner index.
    pub fn reveal_winner<E: EntropySource>(&mut self, now: i64, entropy: &E) -> Result<u32> {
        require!(self.winner_idx == 0, RaffleError::WinnerAlreadyRevealed);
        require!(self.has_ended(now), RaffleError::RaffleNotEnded);
        require!(self.total_sold > 0, RaffleError::NoTicketsSold);

        let seed = draw_seed(entropy, self.idx, self.total_sold, now)?;
        let winner = seed % self.total_sold as u64;
        self.winner_idx = (winner as u32)
            .checked_add(1)
            .ok_or(RaffleError::NumericOverflow)?;

        Ok(self.winner_idx)
    }

    pub fn winning_uid(&self) -> Result<[u8; UID_LENGTH]> {
        require!(self.winner_idx > 0, RaffleError::WinnerNotRevealed);
        let ticket = self
            .tickets
            .get(self.winner_idx as usize - 1)
            .ok_or(RaffleError::NumericOverflow)?;
        Ok(ticket.uid)
    }

    /// Checks that `uid` holds the winning ticket and the prize is still
    /// waiting to be claimed through `kind`.
    pub fn verify_claim(&self, uid: &[u8; UID_LENGTH], kind: PrizeKind) -> Result<()> {
        require!(self.winner_idx > 0, RaffleError::WinnerNotRevealed);
        require!(!self.is_claimed, RaffleError::PrizeAlreadyClaimed);
        require!(self.winning_uid()? == *uid, RaffleError::WinnerNotMatched);
        require!(self.prize_kind == kind, RaffleError::InvalidTokenStandard);
        Ok(())
    }

    pub fn mark_claimed(&mut self) -> Result<()> {
        require!(!self.is_claimed, RaffleError::PrizeAlreadyClaimed);
        self.is_claimed = true;
        Ok(())
    }

    pub fn mark_withdrawn(&mut self, now: i64) -> Result<()> {
        require!(!self.is_withdrawn, RaffleError::RaffleAlreadyWithdrawn);
        require!(self.has_ended(now), RaffleError::RaffleNotEnded);
        self.is_withdrawn = true;
        Ok(())
    }
}

/// Tickets held by one buyer id in one raffle.
#[account]
#[derive(InitSpace)]
pub struct UserTicket {
    pub raffle_idx: u32,

    /// Wallet the buyer id was first used with. Fixed after the first
    /// purchase.
    pub authority: Pubkey,

    pub uid: [u8; UID_LENGTH],

    /// Equals the number of entries tagged with `uid` in the raffle's ticket
    /// list.
    pub amount: u32,

    pub bump: u8,
}

impl UserTicket {
    /// Binds a fresh account to `wallet`, or checks an existing binding.
    pub fn bind(
        &mut self,
        raffle_idx: u32,
        wallet: Pubkey,
        uid: [u8; UID_LENGTH],
        bump: u8,
    ) -> Result<()> {
        if self.authority == Pubkey::default() {
            self.raffle_idx = raffle_idx;
            self.authority = wallet;
            self.uid = uid;
            self.amount = 0;
            self.bump = bump;
            return Ok(());
        }

        require_keys_eq!(self.authority, wallet, RaffleError::InvalidWallet);
        Ok(())
    }

    pub fn add_tickets(&mut self, amount: u32, limit: u32) -> Result<()> {
        let held = self
            .amount
            .checked_add(amount)
            .ok_or(RaffleError::NumericOverflow)?;
        require!(held <= limit, RaffleError::WalletLimitExceed);
        self.amount = held;
        Ok(())
    }

    pub fn verify_owner(&self, claimant: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *claimant, RaffleError::Unauthorized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::tests::FixedEntropy;
    use anchor_lang::error::Error;
    use anchor_lang::solana_program::entrypoint::MAX_PERMITTED_DATA_INCREASE;

    const START: i64 = 1_700_000_000;
    const END: i64 = START + 10;

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: RaffleError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    fn config() -> GlobalConfig {
        GlobalConfig {
            authority: Pubkey::new_unique(),
            fee_destination: Pubkey::new_unique(),
            raffle_count: 0,
            whitelist: [None; MAX_COLLECTIONS],
            bump: 255,
        }
    }

    fn raffle(total_supply: u32) -> Raffle {
        Raffle {
            idx: 0,
            creator: Pubkey::new_unique(),
            payment_mint: native_mint::ID,
            prize_mint: Pubkey::default(),
            prize_kind: PrizeKind::Standard,
            price: 1_000_000,
            total_supply,
            total_sold: 0,
            winner_idx: 0,
            start_time: START,
            end_time: END,
            is_deposited: false,
            is_claimed: false,
            is_withdrawn: false,
            bump: 254,
            escrow_bump: 253,
            tickets: Vec::with_capacity(total_supply as usize),
        }
    }

    fn deposited(total_supply: u32) -> Raffle {
        let mut raffle = raffle(total_supply);
        raffle
            .record_deposit(Pubkey::new_unique(), PrizeKind::Standard)
            .unwrap();
        raffle
    }

    fn fresh_user() -> UserTicket {
        UserTicket {
            raffle_idx: 0,
            authority: Pubkey::default(),
            uid: [0; UID_LENGTH],
            amount: 0,
            bump: 0,
        }
    }

    fn buy(
        raffle: &mut Raffle,
        user: &mut UserTicket,
        wallet: Pubkey,
        uid: [u8; UID_LENGTH],
        amount: u32,
        now: i64,
    ) -> Result<()> {
        raffle.check_sale_open(now, amount)?;
        let limit = raffle.wallet_limit()?;
        user.bind(raffle.idx, wallet, uid, 250)?;
        user.add_tickets(amount, limit)?;
        raffle.record_purchase(uid, amount)
    }

    #[test]
    fn whitelist_fills_first_empty_slot() {
        let mut config = config();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_eq!(config.add_to_whitelist(a).unwrap(), 0);
        assert_eq!(config.add_to_whitelist(b).unwrap(), 1);
        assert!(config.is_whitelisted(&a));
        assert_err(config.add_to_whitelist(a), RaffleError::DuplicateEntry);
    }

    #[test]
    fn whitelist_removal_keeps_other_slots_in_place() {
        let mut config = config();
        let keys: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for key in &keys {
            config.add_to_whitelist(*key).unwrap();
        }

        assert_eq!(config.remove_from_whitelist(&keys[1]).unwrap(), 1);
        assert_eq!(config.whitelist[0], Some(keys[0]));
        assert_eq!(config.whitelist[1], None);
        assert_eq!(config.whitelist[2], Some(keys[2]));
        assert_err(
            config.remove_from_whitelist(&keys[1]),
            RaffleError::NotFound,
        );

        // the hole is reused before any later slot
        let d = Pubkey::new_unique();
        assert_eq!(config.add_to_whitelist(d).unwrap(), 1);
    }

    #[test]
    fn whitelist_holds_at_most_ten_collections() {
        let mut config = config();
        for _ in 0..MAX_COLLECTIONS {
            config.add_to_whitelist(Pubkey::new_unique()).unwrap();
        }
        let before = config.whitelist;
        assert_err(
            config.add_to_whitelist(Pubkey::new_unique()),
            RaffleError::WhitelistFull,
        );
        assert_eq!(config.whitelist, before);
    }

    #[test]
    fn config_initializes_once() {
        let mut config = GlobalConfig {
            authority: Pubkey::default(),
            fee_destination: Pubkey::default(),
            raffle_count: 0,
            whitelist: [None; MAX_COLLECTIONS],
            bump: 0,
        };
        let admin = Pubkey::new_unique();
        let fees = Pubkey::new_unique();
        config.initialize(admin, fees, 254).unwrap();
        assert_eq!(config.authority, admin);
        assert_eq!(config.fee_destination, fees);
        assert_eq!(config.bump, 254);

        config.add_to_whitelist(Pubkey::new_unique()).unwrap();
        config.claim_raffle_idx(0).unwrap();
        let before = config.clone();
        assert_err(
            config.initialize(Pubkey::new_unique(), Pubkey::new_unique(), 1),
            RaffleError::AlreadyInitialized,
        );
        assert_eq!(config.authority, before.authority);
        assert_eq!(config.fee_destination, before.fee_destination);
        assert_eq!(config.raffle_count, 1);
        assert_eq!(config.whitelist, before.whitelist);
    }

    #[test]
    fn update_settings_replaces_both_keys() {
        let mut config = config();
        let authority = Pubkey::new_unique();
        let fee_destination = Pubkey::new_unique();
        config.update_settings(authority, fee_destination);
        assert_eq!(config.authority, authority);
        assert_eq!(config.fee_destination, fee_destination);
    }

    #[test]
    fn raffle_count_moves_only_on_matching_index() {
        let mut config = config();
        assert_err(config.claim_raffle_idx(1), RaffleError::InvalidRaffleIdx);
        assert_eq!(config.raffle_count, 0);

        config.claim_raffle_idx(0).unwrap();
        assert_eq!(config.raffle_count, 1);
        assert_err(config.claim_raffle_idx(0), RaffleError::InvalidRaffleIdx);
        config.claim_raffle_idx(1).unwrap();
        assert_eq!(config.raffle_count, 2);
    }

    #[test]
    fn raffle_terms_are_validated() {
        Raffle::validate_terms(10, START, END).unwrap();
        assert_err(Raffle::validate_terms(10, END, END), RaffleError::InvalidDate);
        assert_err(Raffle::validate_terms(10, END, START), RaffleError::InvalidDate);
        assert_err(Raffle::validate_terms(0, START, END), RaffleError::InvalidAmount);
        assert_err(
            Raffle::validate_terms(MAX_TICKET_SUPPLY + 1, START, END),
            RaffleError::InvalidAmount,
        );
    }

    #[test]
    fn full_raffle_fits_in_its_account() {
        let space = Raffle::space(MAX_TICKET_SUPPLY);
        assert!(space <= MAX_PERMITTED_DATA_INCREASE);

        let mut raffle = deposited(MAX_TICKET_SUPPLY);
        raffle
            .record_purchase([9; UID_LENGTH], MAX_TICKET_SUPPLY)
            .unwrap();
        let bytes = raffle.try_to_vec().unwrap();
        assert_eq!(bytes.len() + 8, space);
    }

    #[test]
    fn buying_before_deposit_fails() {
        let raffle = raffle(10);
        assert_err(
            raffle.check_sale_open(START, 1),
            RaffleError::PrizeNotDeposited,
        );
    }

    #[test]
    fn sale_window_is_inclusive() {
        let raffle = deposited(10);
        assert_err(
            raffle.check_sale_open(START - 1, 1),
            RaffleError::RaffleNotStarted,
        );
        raffle.check_sale_open(START, 1).unwrap();
        raffle.check_sale_open(END, 1).unwrap();
        assert_err(raffle.check_sale_open(END + 1, 1), RaffleError::RaffleExpired);
        assert_err(raffle.check_sale_open(START, 0), RaffleError::InvalidAmount);
    }

    #[test]
    fn supply_cap_rejects_oversubscription() {
        let mut raffle = deposited(10);
        let (a, b, c) = ([1; UID_LENGTH], [2; UID_LENGTH], [3; UID_LENGTH]);
        let mut user_a = fresh_user();
        let mut user_b = fresh_user();
        let mut user_c = fresh_user();
        let wallet_c = Pubkey::new_unique();

        buy(&mut raffle, &mut user_a, Pubkey::new_unique(), a, 4, START).unwrap();
        buy(&mut raffle, &mut user_b, Pubkey::new_unique(), b, 4, START).unwrap();
        assert_eq!(raffle.total_sold, 8);

        assert_err(
            buy(&mut raffle, &mut user_c, wallet_c, c, 3, START),
            RaffleError::SupplyLimitExceed,
        );
        assert_eq!(raffle.total_sold, 8);
        assert_eq!(user_c.amount, 0);

        buy(&mut raffle, &mut user_c, wallet_c, c, 2, START).unwrap();
        assert_eq!(raffle.total_sold, 10);
        assert_eq!(raffle.tickets.len(), 10);
        assert_eq!(raffle.tickets[9].uid, c);
        assert_err(raffle.record_purchase(c, 1), RaffleError::SupplyLimitExceed);
    }

    #[test]
    fn ticket_list_tracks_every_purchase_in_order() {
        let mut raffle = deposited(100);
        let wallets: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let mut users = vec![fresh_user(), fresh_user(), fresh_user()];

        for (round, amount) in [3u32, 1, 5, 2, 7, 4].into_iter().enumerate() {
            let who = round % 3;
            buy(
                &mut raffle,
                &mut users[who],
                wallets[who],
                [who as u8 + 1; UID_LENGTH],
                amount,
                START + 1,
            )
            .unwrap();
            assert_eq!(raffle.tickets.len(), raffle.total_sold as usize);
            assert!(raffle.total_sold <= raffle.total_supply);
        }

        for (who, user) in users.iter().enumerate() {
            let held = raffle
                .tickets
                .iter()
                .filter(|t| t.uid == [who as u8 + 1; UID_LENGTH])
                .count();
            assert_eq!(user.amount as usize, held);
        }
        assert_eq!(&raffle.tickets[..3], &[RaffleTicket { uid: [1; UID_LENGTH] }; 3]);
        assert_eq!(raffle.tickets[3].uid, [2; UID_LENGTH]);
    }

    #[test]
    fn buyer_id_is_bound_to_first_wallet() {
        let mut raffle = deposited(10);
        let mut user = fresh_user();
        let wallet_a = Pubkey::new_unique();
        let wallet_b = Pubkey::new_unique();
        let uid = [5; UID_LENGTH];

        buy(&mut raffle, &mut user, wallet_a, uid, 1, START).unwrap();
        assert_err(
            buy(&mut raffle, &mut user, wallet_b, uid, 1, START),
            RaffleError::InvalidWallet,
        );
        assert_eq!(user.authority, wallet_a);
        assert_eq!(user.amount, 1);
        assert_eq!(raffle.total_sold, 1);
    }

    #[test]
    fn single_buyer_capped_at_forty_percent() {
        let mut raffle = deposited(10);
        let mut user = fresh_user();
        let wallet = Pubkey::new_unique();
        let uid = [6; UID_LENGTH];

        assert_err(
            buy(&mut raffle, &mut user, wallet, uid, 5, START),
            RaffleError::WalletLimitExceed,
        );
        buy(&mut raffle, &mut user, wallet, uid, 3, START).unwrap();
        buy(&mut raffle, &mut user, wallet, uid, 1, START).unwrap();
        assert_err(
            buy(&mut raffle, &mut user, wallet, uid, 1, START),
            RaffleError::WalletLimitExceed,
        );
        assert_eq!(user.amount, 4);
    }

    #[test]
    fn winner_drawn_once_after_end() {
        let mut raffle = deposited(10);
        let mut user = fresh_user();
        buy(&mut raffle, &mut user, Pubkey::new_unique(), [1; UID_LENGTH], 4, START).unwrap();
        let entropy = FixedEntropy([11; 32]);

        assert_err(
            raffle.reveal_winner(START + 5, &entropy),
            RaffleError::RaffleNotEnded,
        );
        assert_err(raffle.reveal_winner(END, &entropy), RaffleError::RaffleNotEnded);
        assert_eq!(raffle.winner_idx, 0);

        let winner = raffle.reveal_winner(END + 1, &entropy).unwrap();
        assert!((1..=raffle.total_sold).contains(&winner));
        assert_eq!(raffle.winner_idx, winner);

        assert_err(
            raffle.reveal_winner(END + 2, &FixedEntropy([12; 32])),
            RaffleError::WinnerAlreadyRevealed,
        );
        assert_eq!(raffle.winner_idx, winner);
    }

    #[test]
    fn winner_index_stays_in_range() {
        for seed in 0u8..32 {
            let mut raffle = deposited(7);
            raffle.record_purchase([1; UID_LENGTH], 3).unwrap();
            raffle.record_purchase([2; UID_LENGTH], 2).unwrap();
            let winner = raffle
                .reveal_winner(END + 1, &FixedEntropy([seed; 32]))
                .unwrap();
            assert!(winner >= 1 && winner <= 5);
        }
    }

    #[test]
    fn empty_raffle_cannot_be_drawn() {
        let mut raffle = deposited(10);
        assert_err(
            raffle.reveal_winner(END + 1, &FixedEntropy([0; 32])),
            RaffleError::NoTicketsSold,
        );
    }

    #[test]
    fn only_the_winning_wallet_claims_once() {
        let mut raffle = deposited(10);
        let wallet_a = Pubkey::new_unique();
        let wallet_b = Pubkey::new_unique();
        let mut user_a = fresh_user();
        let mut user_b = fresh_user();
        buy(&mut raffle, &mut user_a, wallet_a, [1; UID_LENGTH], 4, START).unwrap();
        buy(&mut raffle, &mut user_b, wallet_b, [2; UID_LENGTH], 4, START).unwrap();

        assert_err(
            raffle.verify_claim(&[1; UID_LENGTH], PrizeKind::Standard),
            RaffleError::WinnerNotRevealed,
        );
        raffle.reveal_winner(END + 1, &FixedEntropy([42; 32])).unwrap();

        let winning_uid = raffle.winning_uid().unwrap();
        let (winner, loser_uid, loser_wallet) = if winning_uid == [1; UID_LENGTH] {
            (&user_a, [2; UID_LENGTH], wallet_b)
        } else {
            (&user_b, [1; UID_LENGTH], wallet_a)
        };

        assert_err(
            raffle.verify_claim(&loser_uid, PrizeKind::Standard),
            RaffleError::WinnerNotMatched,
        );
        assert_err(
            raffle.verify_claim(&winning_uid, PrizeKind::Programmable),
            RaffleError::InvalidTokenStandard,
        );

        raffle.verify_claim(&winning_uid, PrizeKind::Standard).unwrap();
        assert_err(winner.verify_owner(&loser_wallet), RaffleError::Unauthorized);
        winner.verify_owner(&winner.authority).unwrap();
        raffle.mark_claimed().unwrap();

        assert_err(
            raffle.verify_claim(&winning_uid, PrizeKind::Standard),
            RaffleError::PrizeAlreadyClaimed,
        );
        assert_err(
            raffle.verify_claim(&loser_uid, PrizeKind::Programmable),
            RaffleError::PrizeAlreadyClaimed,
        );
        assert_err(raffle.mark_claimed(), RaffleError::PrizeAlreadyClaimed);
    }

    #[test]
    fn prize_deposits_once() {
        let mut raffle = raffle(10);
        let mint = Pubkey::new_unique();
        raffle.record_deposit(mint, PrizeKind::Programmable).unwrap();
        assert_err(
            raffle.record_deposit(Pubkey::new_unique(), PrizeKind::Standard),
            RaffleError::PrizeAlreadyDeposited,
        );
        assert_eq!(raffle.prize_mint, mint);
        assert_eq!(raffle.prize_kind, PrizeKind::Programmable);
    }

    #[test]
    fn funds_withdrawn_once_after_end() {
        let mut raffle = deposited(10);
        assert_err(raffle.mark_withdrawn(END), RaffleError::RaffleNotEnded);
        assert!(!raffle.is_withdrawn);

        raffle.mark_withdrawn(END + 1).unwrap();
        assert!(raffle.is_withdrawn);
        assert_err(
            raffle.mark_withdrawn(END + 100),
            RaffleError::RaffleAlreadyWithdrawn,
        );
    }

    #[test]
    fn withdraw_does_not_wait_for_the_draw() {
        let mut raffle = deposited(10);
        raffle.record_purchase([1; UID_LENGTH], 2).unwrap();
        raffle.mark_withdrawn(END + 1).unwrap();
        assert_eq!(raffle.winner_idx, 0);
        raffle.reveal_winner(END + 2, &FixedEntropy([1; 32])).unwrap();
    }

    #[test]
    fn native_mint_selects_lamport_payments() {
        let mut raffle = raffle(10);
        assert!(raffle.is_native_payment());
        raffle.payment_mint = Pubkey::new_unique();
        assert!(!raffle.is_native_payment());
    }
}
