//! Winner-draw entropy.
//!
//! The only source wired into the program is the `SlotHashes` sysvar: the hash
//! of the most recent slot at the time the draw executes. It is cheap and needs
//! no oracle, but a block producer can observe and influence it and the caller
//! picks the slot the draw lands in. Draws built on it are not verifiable
//! randomness and must not be advertised as such.

use anchor_lang::prelude::*;
use arrayref::array_ref;
use solana_program::keccak;

/// Supplies the bytes a winner draw is seeded from.
pub trait EntropySource {
    fn latest(&self) -> Result<[u8; 32]>;
}

/// Reads the newest entry of the `SlotHashes` sysvar.
///
/// Layout: `u64` entry count, then `(slot: u64, hash: [u8; 32])` pairs, newest
/// first.
pub struct SlotHashEntropy<'a, 'info> {
    sysvar: &'a AccountInfo<'info>,
}

impl<'a, 'info> SlotHashEntropy<'a, 'info> {
    pub fn new(sysvar: &'a AccountInfo<'info>) -> Self {
        Self { sysvar }
    }
}

impl EntropySource for SlotHashEntropy<'_, '_> {
    fn latest(&self) -> Result<[u8; 32]> {
        let data = self.sysvar.try_borrow_data()?;
        if data.len() < 48 {
            return Err(ProgramError::InvalidAccountData.into());
        }
        let entries = u64::from_le_bytes(*array_ref![data, 0, 8]);
        if entries == 0 {
            return Err(ProgramError::InvalidAccountData.into());
        }
        Ok(*array_ref![data, 16, 32])
    }
}

/// Mixes the entropy with the raffle index, its sales and the draw time so two
/// raffles drawn in the same slot still get different seeds.
pub fn draw_seed<E: EntropySource>(
    source: &E,
    raffle_idx: u32,
    total_sold: u32,
    now: i64,
) -> Result<u64> {
    let entropy = source.latest()?;
    let digest = keccak::hashv(&[
        entropy.as_ref(),
        raffle_idx.to_le_bytes().as_ref(),
        total_sold.to_le_bytes().as_ref(),
        now.to_le_bytes().as_ref(),
    ]);
    Ok(u64::from_le_bytes(*array_ref![digest.0, 0, 8]))
}
