//! Cell formatting and table projection shared by the GUI and the CLI.

use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

use crate::{
    domain::{Category, Order, Product, User},
    protocol::Records,
};

pub const INVALID_DATE: &str = "Invalid Date";

/// Renders a loosely typed field the way it arrived: strings verbatim,
/// numbers in shortest form, `null` as an empty cell.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
            (Some(int), _, _) => int.to_string(),
            (None, Some(uint), _) => uint.to_string(),
            (None, None, Some(float)) => float.to_string(),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

pub fn format_price(amount: Option<&Value>) -> String {
    match amount.map(scalar_text) {
        Some(amount) if !amount.is_empty() => format!("${amount}"),
        _ => String::new(),
    }
}

pub fn format_items(items: Option<&[Value]>) -> String {
    items
        .unwrap_or_default()
        .iter()
        .map(scalar_text)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locale of the current user session, falling back to POSIX when the
/// platform reports nothing chrono knows.
pub fn system_locale() -> Locale {
    sys_locale::get_locale()
        .as_deref()
        .and_then(parse_locale)
        .unwrap_or(Locale::POSIX)
}

/// Accepts BCP 47 tags (`en-US`) as well as POSIX names (`de_DE.UTF-8@euro`).
pub fn parse_locale(tag: &str) -> Option<Locale> {
    let name = tag.split(['.', '@']).next()?.trim().replace('-', "_");
    if name.is_empty() {
        return None;
    }
    Locale::try_from(name.as_str()).ok()
}

/// Short date for an ISO-8601 timestamp in the viewer's time zone and locale.
pub fn format_short_date(raw: Option<&str>) -> String {
    format_short_date_in(raw, &Local, system_locale())
}

pub fn format_short_date_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz, locale: Locale) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return String::new();
    };

    let date = if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        parsed.with_timezone(tz).date_naive()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.date()
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        date
    } else {
        return INVALID_DATE.to_string();
    };

    date.format_localized("%x", locale).to_string()
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn number(value: Option<&Value>) -> String {
    value.map(scalar_text).unwrap_or_default()
}

/// Presentation-ready rows for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

pub fn headers(category: Category) -> &'static [&'static str] {
    match category {
        Category::Products => &["ID", "Name", "Category", "Price", "Stock"],
        Category::Orders => &["ID", "User", "Items", "Total", "Status", "Date"],
        Category::Users => &["ID", "Name", "Email", "City", "Joined"],
    }
}

pub fn table_title(category: Category) -> String {
    format!("{} (from {})", category.label(), category.service())
}

pub fn table_view(records: &Records) -> TableView {
    table_view_in(records, &Local, system_locale())
}

pub fn table_view_in<Tz: TimeZone>(records: &Records, tz: &Tz, locale: Locale) -> TableView {
    let rows = match records {
        Records::Products(rows) => rows.iter().map(product_row).collect(),
        Records::Orders(rows) => rows.iter().map(|row| order_row(row, tz, locale)).collect(),
        Records::Users(rows) => rows.iter().map(|row| user_row(row, tz, locale)).collect(),
    };
    let category = records.category();
    TableView {
        title: table_title(category),
        headers: headers(category),
        rows,
    }
}

fn product_row(product: &Product) -> Vec<String> {
    vec![
        product.id.to_string(),
        text(product.name.as_deref()),
        text(product.category.as_deref()),
        format_price(product.price.as_ref()),
        number(product.stock.as_ref()),
    ]
}

fn order_row<Tz: TimeZone>(order: &Order, tz: &Tz, locale: Locale) -> Vec<String> {
    vec![
        order.id.to_string(),
        number(order.user_id.as_ref()),
        format_items(order.items.as_deref()),
        format_price(order.total.as_ref()),
        text(order.status.as_deref()),
        format_short_date_in(order.order_date.as_deref(), tz, locale),
    ]
}

fn user_row<Tz: TimeZone>(user: &User, tz: &Tz, locale: Locale) -> Vec<String> {
    vec![
        user.id.to_string(),
        text(user.name.as_deref()),
        text(user.email.as_deref()),
        text(user.city.as_deref()),
        format_short_date_in(user.joined_at.as_deref(), tz, locale),
    ]
}
