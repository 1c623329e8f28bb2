//! Fabricated accounts and sysvars for running account validation and
//! handlers off-chain.

use std::collections::BTreeSet;
use std::sync::Once;

use anchor_lang::solana_program::{
    bpf_loader_upgradeable,
    entrypoint::SUCCESS,
    program_option::COption,
    program_pack::Pack,
    program_stubs::{set_syscall_stubs, SyscallStubs},
    system_program,
};
use anchor_lang::error::Error;
use anchor_lang::{prelude::*, Bumps};
use anchor_spl::metadata::Metadata;
use anchor_spl::token::spl_token::{
    self,
    native_mint,
    state::{Account as TokenState, AccountState, Mint as MintState},
};

use crate::constants::{
    CONFIG_SEED, ESCROW_SEED, MAX_COLLECTIONS, METADATA_SEED, RAFFLE_SEED, UID_LENGTH, USER_SEED,
};
use crate::state::{GlobalConfig, PrizeKind, Raffle};

/// Clock time seen by handlers under test.
pub const NOW: i64 = 1_700_000_000;

pub const LAMPORTS: u64 = 1_000_000_000;

struct Sysvars;

impl SyscallStubs for Sysvars {
    fn sol_get_rent_sysvar(&self, var_addr: *mut u8) -> u64 {
        unsafe { std::ptr::write(var_addr as *mut Rent, Rent::default()) };
        SUCCESS
    }

    fn sol_get_clock_sysvar(&self, var_addr: *mut u8) -> u64 {
        let clock = Clock {
            unix_timestamp: NOW,
            ..Clock::default()
        };
        unsafe { std::ptr::write(var_addr as *mut Clock, clock) };
        SUCCESS
    }
}

pub fn install_sysvars() {
    static STUBS: Once = Once::new();
    STUBS.call_once(|| {
        set_syscall_stubs(Box::new(Sysvars));
    });
}

fn leak<T>(value: T) -> &'static mut T {
    Box::leak(Box::new(value))
}

pub fn account_with_lamports(
    key: Pubkey,
    owner: Pubkey,
    lamports: u64,
    data: Vec<u8>,
) -> AccountInfo<'static> {
    AccountInfo::new(
        leak(key),
        false,
        true,
        leak(lamports),
        Box::leak(data.into_boxed_slice()),
        leak(owner),
        false,
        0,
    )
}

pub fn account(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> AccountInfo<'static> {
    account_with_lamports(key, owner, LAMPORTS, data)
}

/// A system-owned account with no data.
pub fn wallet(key: Pubkey) -> AccountInfo<'static> {
    account(key, system_program::ID, vec![])
}

pub fn signer(key: Pubkey) -> AccountInfo<'static> {
    let mut info = wallet(key);
    info.is_signer = true;
    info
}

pub fn program(id: Pubkey) -> AccountInfo<'static> {
    let mut info = account(id, bpf_loader_upgradeable::ID, vec![]);
    info.executable = true;
    info
}

/// Stands in for an optional account that was not supplied.
pub fn absent() -> AccountInfo<'static> {
    account(crate::ID, system_program::ID, vec![])
}

/// A program-owned record, zero padded to `space`.
pub fn record<T: AccountSerialize>(
    key: Pubkey,
    value: &T,
    space: usize,
) -> AccountInfo<'static> {
    let mut data = Vec::with_capacity(space);
    value.try_serialize(&mut data).expect("record serializes");
    data.resize(space.max(data.len()), 0);
    account(key, crate::ID, data)
}

pub fn mint_account(key: Pubkey) -> AccountInfo<'static> {
    let state = MintState {
        mint_authority: COption::None,
        supply: 1,
        decimals: 0,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    let mut data = vec![0; MintState::LEN];
    MintState::pack(state, &mut data).expect("mint packs");
    account(key, spl_token::ID, data)
}

pub fn token_account(key: Pubkey, mint: Pubkey, owner: Pubkey, amount: u64) -> AccountInfo<'static> {
    let state = TokenState {
        mint,
        owner,
        amount,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0; TokenState::LEN];
    TokenState::pack(state, &mut data).expect("token account packs");
    account(key, spl_token::ID, data)
}

pub fn config_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], &crate::ID)
}

pub fn raffle_address(idx: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[RAFFLE_SEED, idx.to_le_bytes().as_ref()], &crate::ID)
}

pub fn escrow_address(raffle: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_SEED, raffle.as_ref()], &crate::ID)
}

pub fn user_address(raffle: &Pubkey, uid: &[u8; UID_LENGTH]) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_SEED, raffle.as_ref(), uid.as_ref()], &crate::ID)
}

/// Token Metadata PDA of `mint`, with `extra` seeds appended.
pub fn metadata_address(mint: &Pubkey, extra: &[&[u8]]) -> Pubkey {
    let program = Metadata::id();
    let mut seeds: Vec<&[u8]> = vec![METADATA_SEED, program.as_ref(), mint.as_ref()];
    seeds.extend_from_slice(extra);
    Pubkey::find_program_address(&seeds, &program).0
}

pub fn sample_config(authority: Pubkey, fee_destination: Pubkey) -> GlobalConfig {
    GlobalConfig {
        authority,
        fee_destination,
        raffle_count: 1,
        whitelist: [None; MAX_COLLECTIONS],
        bump: config_address().1,
    }
}

/// An open native-priced raffle of ten tickets with nothing deposited.
pub fn sample_raffle(idx: u32, creator: Pubkey) -> Raffle {
    let (key, bump) = raffle_address(idx);
    Raffle {
        idx,
        creator,
        payment_mint: native_mint::ID,
        prize_mint: Pubkey::new_unique(),
        prize_kind: PrizeKind::Standard,
        price: 1_000_000,
        total_supply: 10,
        total_sold: 0,
        winner_idx: 0,
        start_time: NOW - 100,
        end_time: NOW + 100,
        is_deposited: false,
        is_claimed: false,
        is_withdrawn: false,
        bump,
        escrow_bump: escrow_address(&key).1,
        tickets: Vec::new(),
    }
}

pub fn raffle_account(raffle: &Raffle) -> AccountInfo<'static> {
    record(
        raffle_address(raffle.idx).0,
        raffle,
        Raffle::space(raffle.total_supply),
    )
}

/// Runs Anchor account validation of `T` over `accounts`.
pub fn validate<T>(
    accounts: Vec<AccountInfo<'static>>,
    ix_data: &[u8],
) -> Result<(T, T::Bumps)>
where
    T: Bumps + Accounts<'static, <T as Bumps>::Bumps>,
    T::Bumps: Default,
{
    install_sysvars();
    let mut infos: &'static [AccountInfo<'static>] = Box::leak(accounts.into_boxed_slice());
    let mut bumps = T::Bumps::default();
    let accounts = T::try_accounts(
        &crate::ID,
        &mut infos,
        ix_data,
        &mut bumps,
        &mut BTreeSet::new(),
    )?;
    Ok((accounts, bumps))
}

pub fn expect_err<T>(result: Result<T>) -> Error {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(err) => err,
    }
}
