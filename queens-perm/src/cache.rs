//! Persistent, nibble-packable on-disk cache of enumerated permutations.
//!
//! File layout: `u32` little-endian board count `K`, followed by the
//! concatenated bodies of all `K` permutations, either one byte per row
//! value ("unpacked") or two row values per byte, high nibble first
//! ("packed"). Packed mode halves the file size since row values for
//! N <= 15 always fit in a nibble.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use queens_core::{MAX_SIZE, MIN_SIZE};
use rand::Rng;

use crate::enumerate::enumerate;
use crate::error::PermError;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
macro_rules! instrument {
    ($($tt:tt)*) => {};
}

/// Where and how the permutation cache is stored. Explicit and
/// caller-owned — no process-wide global, per the redesign note that
/// replaces the original's global config with a value passed into calls.
#[derive(Debug, Clone)]
pub struct PermutationStoreConfig {
    pub cache_dir: PathBuf,
    pub packed: bool,
}

impl PermutationStoreConfig {
    pub fn new(cache_dir: impl Into<PathBuf>, packed: bool) -> Self {
        PermutationStoreConfig {
            cache_dir: cache_dir.into(),
            packed,
        }
    }
}

/// All `K` complete permutations for a given board size, decompressed to
/// one row value per byte in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationResult {
    pub size: u8,
    pub boards_count: u32,
    /// Row-major by permutation: `rows[p * size + c]` is the row of the
    /// queen in column `c` of permutation `p`.
    pub rows: Vec<u8>,
}

impl PermutationResult {
    pub fn permutation(&self, index: usize) -> &[u8] {
        let n = self.size as usize;
        &self.rows[index * n..(index + 1) * n]
    }
}

pub struct PermutationStore {
    config: PermutationStoreConfig,
}

impl PermutationStore {
    pub fn new(config: PermutationStoreConfig) -> Self {
        PermutationStore { config }
    }

    fn check_size(n: u8) -> Result<(), PermError> {
        if (MIN_SIZE..=MAX_SIZE).contains(&n) {
            Ok(())
        } else {
            Err(PermError::InvalidBoardSize(n))
        }
    }

    fn cache_path(&self, n: u8) -> PathBuf {
        let suffix = if self.config.packed { 'c' } else { 'n' };
        self.config
            .cache_dir
            .join(format!("QueensPermutations_{n:02}{suffix}.bin"))
    }

    /// Ensure the cache file for `n` exists, generating and writing it if
    /// necessary. Returns the path to the (now-existing) file.
    fn ensure_cache(&self, n: u8) -> Result<PathBuf, PermError> {
        let path = self.cache_path(n);
        if path.exists() {
            return Ok(path);
        }

        trace!(n, "perm.cache_miss");
        fs::create_dir_all(&self.config.cache_dir)?;
        let rows = enumerate(n);
        let boards_count = (rows.len() / n as usize) as u32;
        self.write_cache(&path, n, boards_count, &rows)?;
        debug!(n, boards_count, "perm.cache_generated");
        Ok(path)
    }

    fn write_cache(&self, path: &Path, n: u8, boards_count: u32, rows: &[u8]) -> Result<(), PermError> {
        let tmp_path = path.with_extension("bin.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&boards_count.to_le_bytes())?;
            if self.config.packed {
                file.write_all(&pack_nibbles(rows))?;
            } else {
                file.write_all(rows)?;
            }
        }
        fs::rename(&tmp_path, path)?;
        let _ = n;
        Ok(())
    }

    /// Load or generate, then return every enumerated permutation.
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(n)))]
    pub fn get_all(&self, n: u8) -> Result<PermutationResult, PermError> {
        Self::check_size(n)?;
        let path = self.ensure_cache(n)?;

        let mut file = File::open(&path)?;
        let boards_count = read_u32(&mut file)?;

        let n_usize = n as usize;
        let total_rows = n_usize * boards_count as usize;
        let mut rows;
        if self.config.packed {
            let packed_len = total_rows.div_ceil(2);
            let mut buf = vec![0u8; packed_len];
            file.read_exact(&mut buf)?;
            rows = unpack_nibbles(&buf, total_rows);
        } else {
            rows = vec![0u8; total_rows];
            file.read_exact(&mut rows)?;
        }
        rows.truncate(total_rows);

        Ok(PermutationResult {
            size: n,
            boards_count,
            rows,
        })
    }

    /// Read exactly one permutation, drawn uniformly at random, without
    /// materializing the whole file.
    pub fn get_random<R: Rng + ?Sized>(&self, n: u8, rng: &mut R) -> Result<Vec<u8>, PermError> {
        Self::check_size(n)?;
        let path = self.ensure_cache(n)?;

        let mut file = File::open(&path)?;
        let boards_count = read_u32(&mut file)?;
        if boards_count == 0 {
            return Err(PermError::CorruptCache {
                path,
                reason: "zero boards in cache".to_string(),
            });
        }

        let index = rng.random_range(0..boards_count) as u64;
        let n_u64 = n as u64;

        if self.config.packed {
            let nibble_offset = index * n_u64; // nibbles, from start of row data
            let byte_offset = nibble_offset / 2;
            let starts_mid_byte = nibble_offset % 2 == 1;
            let bytes_to_read = (n as usize).div_ceil(2);

            file.seek(SeekFrom::Start(4 + byte_offset))?;
            let mut buf = vec![0u8; bytes_to_read];
            file.read_exact(&mut buf)?;
            if starts_mid_byte {
                // The window straddles a nibble boundary: shift left so the
                // board's first nibble lands at the top of buf[0].
                shift_left_one_nibble(&mut buf);
            }
            Ok(unpack_nibbles(&buf, n as usize))
        } else {
            let byte_offset = 4 + index * n_u64;
            file.seek(SeekFrom::Start(byte_offset))?;
            let mut buf = vec![0u8; n as usize];
            file.read_exact(&mut buf)?;
            Ok(buf)
        }
    }
}

fn read_u32(file: &mut File) -> Result<u32, PermError> {
    let mut buf = [0u8; 4];
    file.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Pack row values two per byte, high nibble first; zero-pad a trailing odd
/// element into the low nibble.
fn pack_nibbles(rows: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rows.len().div_ceil(2));
    let mut iter = rows.chunks(2);
    for pair in &mut iter {
        let hi = pair[0] & 0x0F;
        let lo = pair.get(1).copied().unwrap_or(0) & 0x0F;
        out.push((hi << 4) | lo);
    }
    out
}

/// Unpack `count` row values from nibble-packed bytes.
fn unpack_nibbles(packed: &[u8], count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);
    for &byte in packed {
        if out.len() >= count {
            break;
        }
        out.push((byte >> 4) & 0x0F);
        if out.len() >= count {
            break;
        }
        out.push(byte & 0x0F);
    }
    out
}

/// Shift an in-memory byte window left by one nibble, carrying the high
/// nibble of each following byte into the low nibble of its predecessor.
/// Used to realign a packed read that started mid-byte (odd permutation
/// index with an odd board size).
fn shift_left_one_nibble(buf: &mut [u8]) {
    let len = buf.len();
    if len == 0 {
        return;
    }
    for i in 0..len - 1 {
        buf[i] = (buf[i] << 4) | (buf[i + 1] >> 4);
    }
    let last = len - 1;
    buf[last] <<= 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips_even_length() {
        let rows = vec![1, 2, 3, 4, 5, 6];
        let packed = pack_nibbles(&rows);
        assert_eq!(packed.len(), 3);
        let back = unpack_nibbles(&packed, rows.len());
        assert_eq!(back, rows);
    }

    #[test]
    fn pack_unpack_round_trips_odd_length_with_zero_pad() {
        let rows = vec![1, 2, 3, 4, 5];
        let packed = pack_nibbles(&rows);
        assert_eq!(packed.len(), 3);
        assert_eq!(packed[2] & 0x0F, 0);
        let back = unpack_nibbles(&packed, rows.len());
        assert_eq!(back, rows);
    }

    #[test]
    fn get_all_generates_then_reuses_cache() {
        let dir = std::env::temp_dir().join(format!("queens-perm-test-{}", std::process::id()));
        let config = PermutationStoreConfig::new(&dir, false);
        let store = PermutationStore::new(config);

        let first = store.get_all(5).unwrap();
        assert_eq!(first.boards_count, 14);
        assert_eq!(first.rows.len(), 14 * 5);

        let second = store.get_all(5).unwrap();
        assert_eq!(first, second);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn packed_and_unpacked_caches_agree() {
        let dir = std::env::temp_dir().join(format!("queens-perm-test-pack-{}", std::process::id()));
        let unpacked_store = PermutationStore::new(PermutationStoreConfig::new(&dir, false));
        let packed_store = PermutationStore::new(PermutationStoreConfig::new(&dir, true));

        let unpacked = unpacked_store.get_all(6).unwrap();
        let packed = packed_store.get_all(6).unwrap();
        assert_eq!(unpacked.rows, packed.rows);
        assert_eq!(unpacked.boards_count, packed.boards_count);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn get_random_returns_a_member_of_get_all() {
        use rand::SeedableRng;
        let dir = std::env::temp_dir().join(format!("queens-perm-test-rand-{}", std::process::id()));
        let config = PermutationStoreConfig::new(&dir, true);
        let store = PermutationStore::new(config);

        let all = store.get_all(6).unwrap();
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
        for _ in 0..20 {
            let sampled = store.get_random(6, &mut rng).unwrap();
            let found = (0..all.boards_count as usize).any(|i| all.permutation(i) == sampled.as_slice());
            assert!(found, "sampled permutation {sampled:?} not found in get_all output");
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        let dir = std::env::temp_dir().join(format!("queens-perm-test-range-{}", std::process::id()));
        let store = PermutationStore::new(PermutationStoreConfig::new(&dir, false));
        assert!(matches!(store.get_all(4), Err(PermError::InvalidBoardSize(4))));
        assert!(matches!(store.get_all(16), Err(PermError::InvalidBoardSize(16))));
    }
}
