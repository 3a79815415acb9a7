//! Aggregate statistics over an inventory snapshot.
//!
//! Everything here is a pure function of the item list and a reference
//! instant, so the same snapshot always yields the same report. Quantity
//! weighting follows the storage convention: missing/zero quantities count
//! as one item for distribution stats but as zero weight for waste and
//! trend sums.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use freshkeep_shared::food::FoodItem;
use freshkeep_shared::parse_date_time;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub name: String,
    pub count: u32,
    pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StorageStat {
    pub location: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeekTrend {
    pub week: String,
    pub weight: u32,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NutrientStat {
    pub name: &'static str,
    pub value: u32,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WasteData {
    pub amount: u32,
    pub trend: i64,
}

/// Reporting window, anchored at the reference instant.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum Period {
    #[strum(serialize = "本周")]
    #[serde(rename = "本周")]
    ThisWeek,
    #[default]
    #[strum(serialize = "本月")]
    #[serde(rename = "本月")]
    ThisMonth,
    #[strum(serialize = "近3个月")]
    #[serde(rename = "近3个月")]
    LastThreeMonths,
    #[strum(serialize = "本年")]
    #[serde(rename = "本年")]
    ThisYear,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub title: String,
    pub generate_time: String,
    pub summary: ReportSummary,
    pub category_analysis: CategoryAnalysis,
    pub waste_analysis: WasteAnalysis,
    pub weekly_trend: Vec<WeekTrend>,
    pub nutrition_analysis: NutritionSummary,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_items: u32,
    pub total_waste: u32,
    pub waste_rate: f64,
    pub avg_weekly_add: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    pub top_category: String,
    pub top_category_count: u32,
    pub least_category: String,
    pub least_category_count: u32,
    pub categories: Vec<CategoryStat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteAnalysis {
    pub amount: u32,
    pub trend: i64,
    pub trend_description: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    pub top_nutrient: &'static str,
    pub top_nutrient_value: u32,
    pub details: Vec<NutrientStat>,
}

/// Quantity-weighted distribution over the stored category labels,
/// uncategorized items pooled under 其他, sorted by weight descending.
pub fn category_stats(items: &[FoodItem]) -> Vec<CategoryStat> {
    let groups = group_weights(items, |item| {
        if item.category.is_empty() {
            "其他".to_owned()
        } else {
            item.category.clone()
        }
    });

    let total: u32 = groups.iter().map(|(_, count)| count).sum();
    let mut stats: Vec<CategoryStat> = groups
        .into_iter()
        .map(|(name, count)| CategoryStat {
            name,
            count,
            percentage: round_half_up(f64::from(count) / f64::from(total) * 100.0) as u32,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Quantity-weighted distribution over storage locations, unknown pooled
/// under 未知, sorted by weight descending.
pub fn storage_stats(items: &[FoodItem]) -> Vec<StorageStat> {
    let mut stats: Vec<StorageStat> = group_weights(items, |item| {
        if item.storage_location.is_empty() {
            "未知".to_owned()
        } else {
            item.storage_location.clone()
        }
    })
    .into_iter()
    .map(|(location, count)| StorageStat { location, count })
    .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Items whose expiration instant falls inside `[now, now + 3 days]`.
pub fn expiring_foods(items: &[FoodItem], now: NaiveDateTime) -> Vec<FoodItem> {
    let limit = now + Duration::days(3);
    items
        .iter()
        .filter(|item| {
            parse_date_time(&item.expire_date)
                .map(|expire| expire >= now && expire <= limit)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Items already past their expiration instant.
pub fn expired_foods(items: &[FoodItem], now: NaiveDateTime) -> Vec<FoodItem> {
    items
        .iter()
        .filter(|item| {
            parse_date_time(&item.expire_date)
                .map(|expire| expire < now)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Total quantity bound up in expired items.
pub fn waste_weight(items: &[FoodItem], now: NaiveDateTime) -> u32 {
    expired_foods(items, now)
        .iter()
        .map(|item| item.quantity)
        .sum()
}

/// Additions over the last four rolling weeks, oldest week first. When no
/// week carries any weight the fixed sample rows are returned so trend
/// charts always have something to draw.
pub fn weekly_trend(items: &[FoodItem], now: NaiveDateTime) -> Vec<WeekTrend> {
    let weeks = collect_weeks(items, now, 4);
    if weeks.iter().all(|week| week.weight == 0) {
        return sample_weeks();
    }
    weeks
}

/// Nutrient estimate derived from the category distribution via the fixed
/// ratio table.
pub fn nutrition_analysis(items: &[FoodItem]) -> Vec<NutrientStat> {
    nutrients_from_categories(&category_stats(items))
}

/// Start/end instants of a reporting window. The week starts on Sunday
/// midnight; month-based windows start on the first of the month; the end
/// is always the reference instant itself.
pub fn date_range(period: Period, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = match period {
        Period::ThisWeek => {
            let back = i64::from(now.date().weekday().num_days_from_sunday());
            now.date() - Duration::days(back)
        }
        Period::ThisMonth => month_start(now.year(), i64::from(now.month0())),
        Period::LastThreeMonths => month_start(now.year(), i64::from(now.month0()) - 2),
        Period::ThisYear => month_start(now.year(), 0),
    };
    (start.and_time(NaiveTime::MIN), now)
}

/// Items whose entry timestamp (created, else purchased, else expiration)
/// falls inside the period window.
pub fn filtered_items(items: &[FoodItem], period: Period, now: NaiveDateTime) -> Vec<FoodItem> {
    let (start, end) = date_range(period, now);
    items
        .iter()
        .filter(|item| {
            entry_timestamp(item)
                .map(|ts| ts >= start && ts <= end)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

pub fn category_stats_by_period(
    items: &[FoodItem],
    period: Period,
    now: NaiveDateTime,
) -> Vec<CategoryStat> {
    category_stats(&filtered_items(items, period, now))
}

/// Expired quantity inside the window, with a percentage trend against the
/// equally-sized preceding window. An empty preceding window with current
/// waste reports +100.
pub fn waste_data_by_period(items: &[FoodItem], period: Period, now: NaiveDateTime) -> WasteData {
    let (start, end) = date_range(period, now);
    let span = end - start;
    let prev_end = start - Duration::milliseconds(1);
    let prev_start = start - span;

    let current = expired_entry_weight(items, now, start, end);
    let previous = expired_entry_weight(items, now, prev_start, prev_end);

    let trend = if previous > 0 {
        round_half_up(
            (f64::from(current) - f64::from(previous)) / f64::from(previous) * 100.0,
        )
    } else if current > 0 {
        100
    } else {
        0
    };

    WasteData {
        amount: current,
        trend,
    }
}

/// Weekly additions inside the window, capped at four weeks counted back
/// from the window end. Falls back to the sample rows like
/// [`weekly_trend`] when every week is weightless.
pub fn weekly_trend_by_period(
    items: &[FoodItem],
    period: Period,
    now: NaiveDateTime,
) -> Vec<WeekTrend> {
    let (start, end) = date_range(period, now);
    let span_ms = (end - start).num_milliseconds();
    let mut week_count = span_ms.div_euclid(WEEK_MS);
    if span_ms.rem_euclid(WEEK_MS) > 0 {
        week_count += 1;
    }
    let week_count = week_count.min(4) as usize;

    let weeks = collect_weeks(items, end, week_count);
    if weeks.iter().all(|week| week.weight == 0) {
        return sample_weeks();
    }
    weeks
}

pub fn nutrition_analysis_by_period(
    items: &[FoodItem],
    period: Period,
    now: NaiveDateTime,
) -> Vec<NutrientStat> {
    nutrients_from_categories(&category_stats_by_period(items, period, now))
}

/// Assemble the current month's management report.
pub fn monthly_report(items: &[FoodItem], now: NaiveDateTime) -> MonthlyReport {
    let categories = category_stats_by_period(items, Period::ThisMonth, now);
    let waste = waste_data_by_period(items, Period::ThisMonth, now);
    let weekly = weekly_trend_by_period(items, Period::ThisMonth, now);
    let nutrition = nutrition_analysis_by_period(items, Period::ThisMonth, now);

    let total_items: u32 = categories.iter().map(|cat| cat.count).sum();
    let waste_rate = if total_items > 0 {
        round_one_decimal(f64::from(waste.amount) / f64::from(total_items) * 100.0)
    } else {
        0.0
    };
    let avg_weekly_add = if weekly.is_empty() {
        0.0
    } else {
        let total_weight: u32 = weekly.iter().map(|week| week.weight).sum();
        round_one_decimal(f64::from(total_weight) / weekly.len() as f64)
    };

    let (top_name, top_count) = categories
        .first()
        .map(|cat| (cat.name.clone(), cat.count))
        .unwrap_or(("无".to_owned(), 0));
    let (least_name, least_count) = categories
        .last()
        .map(|cat| (cat.name.clone(), cat.count))
        .unwrap_or(("无".to_owned(), 0));

    // First strict maximum wins, so ties keep the table order.
    let (top_nutrient, top_nutrient_value) = nutrition
        .iter()
        .fold(None::<&NutrientStat>, |best, item| match best {
            Some(current) if item.value > current.value => Some(item),
            None => Some(item),
            keep => keep,
        })
        .map(|stat| (stat.name, stat.value))
        .unwrap_or(("无", 0));

    let trend_description = if waste.trend > 0 {
        "上升"
    } else if waste.trend < 0 {
        "下降"
    } else {
        "持平"
    };

    let recommendations = generate_recommendations(waste_rate, &top_name, waste.trend);

    MonthlyReport {
        title: format!("{}年{}月食材管理月度报告", now.year(), now.month()),
        generate_time: now.format("%Y/%-m/%-d %H:%M:%S").to_string(),
        summary: ReportSummary {
            total_items,
            total_waste: waste.amount,
            waste_rate,
            avg_weekly_add,
        },
        category_analysis: CategoryAnalysis {
            top_category: top_name,
            top_category_count: top_count,
            least_category: least_name,
            least_category_count: least_count,
            categories,
        },
        waste_analysis: WasteAnalysis {
            amount: waste.amount,
            trend: waste.trend,
            trend_description,
        },
        weekly_trend: weekly,
        nutrition_analysis: NutritionSummary {
            top_nutrient,
            top_nutrient_value,
            details: nutrition,
        },
        recommendations,
    }
}

/// Advice lines keyed on waste rate, dominant category and waste trend,
/// always closed by the two standing reminders.
pub fn generate_recommendations(
    waste_rate: f64,
    top_category: &str,
    waste_trend: i64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if waste_rate > 20.0 {
        recommendations.push("浪费率较高，建议合理规划采购量，避免过度囤积".to_owned());
    } else if waste_rate > 10.0 {
        recommendations.push("浪费率适中，可以进一步优化食材使用计划".to_owned());
    } else {
        recommendations.push("浪费率控制良好，继续保持".to_owned());
    }

    match top_category {
        "蔬菜" => {
            recommendations.push("蔬菜类食材较多，注意保鲜储存，建议优先消费易腐食材".to_owned())
        }
        "水果" => recommendations.push("水果类食材较多，建议按成熟度分类储存，及时食用".to_owned()),
        "肉类" => recommendations.push("肉类食材较多，注意冷冻保存，合理安排烹饪计划".to_owned()),
        _ => {}
    }

    if waste_trend > 10 {
        recommendations.push("浪费趋势上升明显，建议检查储存条件和食材使用习惯".to_owned());
    } else if waste_trend < -10 {
        recommendations.push("浪费趋势下降良好，继续保持当前的管理方式".to_owned());
    }

    recommendations.push("定期检查食材保质期，建立先进先出的使用原则".to_owned());
    recommendations.push("根据实际需求制定采购计划，避免冲动购买".to_owned());

    recommendations
}

/// Sum of `quantity || 1` per group key, in first-seen key order.
fn group_weights(items: &[FoodItem], key: impl Fn(&FoodItem) -> String) -> Vec<(String, u32)> {
    let mut groups: Vec<(String, u32)> = Vec::new();
    for item in items {
        let name = key(item);
        let weight = item.quantity.max(1);
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, count)) => *count += weight,
            None => groups.push((name, weight)),
        }
    }
    groups
}

fn collect_weeks(items: &[FoodItem], end: NaiveDateTime, week_count: usize) -> Vec<WeekTrend> {
    let mut weeks = Vec::with_capacity(week_count);
    for i in (0..week_count as i64).rev() {
        let week_start = end - Duration::days((i + 1) * 7);
        let week_end = end - Duration::days(i * 7);

        let in_week: Vec<&FoodItem> = items
            .iter()
            .filter(|item| {
                added_timestamp(item)
                    .map(|ts| ts >= week_start && ts < week_end)
                    .unwrap_or(false)
            })
            .collect();

        weeks.push(WeekTrend {
            week: format!("第{}周", week_count as i64 - i),
            weight: in_week.iter().map(|item| item.quantity).sum(),
            count: in_week.len(),
        });
    }
    weeks
}

fn sample_weeks() -> Vec<WeekTrend> {
    vec![
        WeekTrend {
            week: "第1周".to_owned(),
            weight: 5,
            count: 3,
        },
        WeekTrend {
            week: "第2周".to_owned(),
            weight: 8,
            count: 5,
        },
        WeekTrend {
            week: "第3周".to_owned(),
            weight: 6,
            count: 4,
        },
        WeekTrend {
            week: "第4周".to_owned(),
            weight: 10,
            count: 7,
        },
    ]
}

fn nutrients_from_categories(categories: &[CategoryStat]) -> Vec<NutrientStat> {
    let total: u32 = categories.iter().map(|cat| cat.count).sum();
    let (mut protein, mut carbs, mut fat, mut fiber) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);

    if total > 0 {
        for cat in categories {
            let ratio = f64::from(cat.count) / f64::from(total);
            // The ratio table keys on the stored label verbatim; anything
            // else takes the mixed default row.
            match cat.name.as_str() {
                "肉类" | "海鲜" => {
                    protein += ratio * 100.0;
                    fat += ratio * 60.0;
                }
                "主食" => {
                    carbs += ratio * 120.0;
                    fiber += ratio * 30.0;
                }
                "蔬菜" => {
                    fiber += ratio * 80.0;
                    carbs += ratio * 20.0;
                }
                "水果" => {
                    carbs += ratio * 40.0;
                    fiber += ratio * 50.0;
                }
                _ => {
                    protein += ratio * 20.0;
                    carbs += ratio * 30.0;
                    fat += ratio * 20.0;
                    fiber += ratio * 25.0;
                }
            }
        }
    }

    vec![
        NutrientStat {
            name: "蛋白质",
            value: round_half_up(protein) as u32,
            color: "#ff6b6b",
        },
        NutrientStat {
            name: "碳水",
            value: round_half_up(carbs) as u32,
            color: "#4ecdc4",
        },
        NutrientStat {
            name: "脂肪",
            value: round_half_up(fat) as u32,
            color: "#45b7d1",
        },
        NutrientStat {
            name: "纤维",
            value: round_half_up(fiber) as u32,
            color: "#96ceb4",
        },
    ]
}

/// First non-empty of created/purchased timestamps; unparseable text stays
/// excluded rather than falling through to the next field.
fn added_timestamp(item: &FoodItem) -> Option<NaiveDateTime> {
    let raw = item
        .created_at
        .as_deref()
        .filter(|value| !value.is_empty())
        .or(item
            .purchase_date
            .as_deref()
            .filter(|value| !value.is_empty()))?;
    parse_date_time(raw)
}

/// Like [`added_timestamp`] but closing the chain with the expiration
/// date, which every record carries.
fn entry_timestamp(item: &FoodItem) -> Option<NaiveDateTime> {
    let raw = item
        .created_at
        .as_deref()
        .filter(|value| !value.is_empty())
        .or(item
            .purchase_date
            .as_deref()
            .filter(|value| !value.is_empty()))
        .unwrap_or(item.expire_date.as_str());
    parse_date_time(raw)
}

fn expired_entry_weight(
    items: &[FoodItem],
    now: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> u32 {
    items
        .iter()
        .filter(|item| {
            parse_date_time(&item.expire_date)
                .map(|expire| expire < now)
                .unwrap_or(false)
        })
        .filter(|item| {
            entry_timestamp(item)
                .map(|ts| ts >= start && ts <= end)
                .unwrap_or(false)
        })
        .map(|item| item.quantity)
        .sum()
}

fn month_start(year: i32, month0: i64) -> NaiveDate {
    let year = year + month0.div_euclid(12) as i32;
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Rounds halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
