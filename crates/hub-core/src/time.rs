use std::time::{SystemTime, UNIX_EPOCH};

pub type EpochMillis = u64;

pub fn now_epoch_millis() -> EpochMillis {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    millis_saturating(since_epoch.as_millis())
}

fn millis_saturating(millis: u128) -> EpochMillis {
    EpochMillis::try_from(millis).unwrap_or(EpochMillis::MAX)
}
