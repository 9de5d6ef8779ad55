//! Scope ids joining a style record to its generated selector.

use std::sync::atomic::{AtomicU64, Ordering};

/// Longest scope id kept after sanitisation.
pub const MAX_SCOPE_ID_LEN: usize = 64;

/// Keep only `[A-Za-z0-9-_:.]` and cap the length.
///
/// Returns `None` when nothing usable remains.
///
/// ```
/// use costered::style::sanitize_scope_id;
///
/// assert_eq!(sanitize_scope_id("cst-a1 b\"2").as_deref(), Some("cst-a1b2"));
/// assert_eq!(sanitize_scope_id("  \"'"), None);
/// ```
pub fn sanitize_scope_id(raw: &str) -> Option<String> {
    let id: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .take(MAX_SCOPE_ID_LEN)
        .collect();
    (!id.is_empty()).then_some(id)
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

#[cfg(target_arch = "wasm32")]
fn time_seed_nanos() -> u64 {
    12345
}

/// SplitMix64 finaliser; spreads sequential seeds over the whole range.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Generate a fresh scope id such as `cst-3f9a0c12d4e7`.
///
/// Ids are unique within a process and unlikely to collide across processes.
pub fn generate_scope_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let value = mix(time_seed_nanos() ^ mix(n));
    format!("cst-{:012x}", value & 0xffff_ffff_ffff)
}
