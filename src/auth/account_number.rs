use rand::Rng;

/// Account numbers are drawn from `[0, ACCOUNT_NUMBER_LIMIT)`
pub const ACCOUNT_NUMBER_LIMIT: i64 = 100_000;

/// Pick a uniformly random account number.
///
/// Uniqueness is not checked here; stores reject duplicates and
/// `services::account_service` retries with a fresh number.
pub fn allocate_account_number() -> i64 {
    allocate_account_number_with(&mut rand::thread_rng())
}

pub fn allocate_account_number_with<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..ACCOUNT_NUMBER_LIMIT)
}
