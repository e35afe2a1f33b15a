use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::model::leaderboard::TimePeriod;

/// 半开区间 `[start, end)`，`end` 为请求时刻
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 按请求时刻所在时区计算窗口起点
pub fn resolve<Tz: TimeZone>(
    period: TimePeriod,
    now: DateTime<Tz>,
    platform_epoch: DateTime<Utc>,
) -> TimeWindow {
    let end = now.with_timezone(&Utc);
    let today = now.date_naive();
    let start = match period {
        TimePeriod::Daily => local_midnight(&now, today),
        TimePeriod::Weekly => {
            let since_monday = today.weekday().num_days_from_monday() as i64;
            local_midnight(&now, today - Duration::days(since_monday))
        }
        TimePeriod::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            local_midnight(&now, first)
        }
        TimePeriod::AllTime => platform_epoch,
    };
    TimeWindow { start, end }
}

fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    let tz = now.timezone();
    // 夏令时切换恰好落在零点时本地时间可能不存在，按 UTC 解释兜底
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, day, hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn daily_starts_at_local_midnight() {
        let now = at(21, 15);
        let window = resolve(TimePeriod::Daily, now, epoch());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 20, 22, 0, 0).unwrap());
        assert_eq!(window.end, now.with_timezone(&Utc));
    }

    #[test]
    fn weekly_starts_on_monday() {
        // 2026-10-21 是周三
        let window = resolve(TimePeriod::Weekly, at(21, 15), epoch());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 18, 22, 0, 0).unwrap());

        // 周日仍然归到本周一
        let window = resolve(TimePeriod::Weekly, at(25, 9), epoch());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 18, 22, 0, 0).unwrap());

        // 周一当天从当天零点开始
        let window = resolve(TimePeriod::Weekly, at(19, 1), epoch());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 18, 22, 0, 0).unwrap());
    }

    #[test]
    fn monthly_and_all_time() {
        let window = resolve(TimePeriod::Monthly, at(21, 15), epoch());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 9, 30, 22, 0, 0).unwrap());

        let window = resolve(TimePeriod::AllTime, at(21, 15), epoch());
        assert_eq!(window.start, epoch());
        assert!(window.start < window.end);
    }
}
