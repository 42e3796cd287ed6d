use std::time::Duration;

/// Sleeps `base` plus a uniformly random share of `jitter`.
pub(crate) async fn polite_pause(base: Duration, jitter: Duration) {
    let delay = base + jitter.mul_f64(rand::random::<f64>());
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Plain wait used for settle delays.
pub(crate) async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
