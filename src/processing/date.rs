use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_SEPARATORS: Regex = Regex::new(r"[/\-.]").unwrap();
}

#[derive(Debug, Clone, Copy)]
enum Order {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

#[derive(Debug, Clone, Copy)]
enum YearWidth {
    Four,
    Two,
}

#[derive(Debug, Clone, Copy)]
struct DateTemplate {
    order: Order,
    separator: char,
    year: YearWidth,
}

const fn template(order: Order, separator: char, year: YearWidth) -> DateTemplate {
    DateTemplate { order, separator, year }
}

// Priority order. Day-first wins over month-first for ambiguous input.
const DATE_TEMPLATES: [DateTemplate; 18] = [
    template(Order::DayMonthYear, '/', YearWidth::Four),
    template(Order::DayMonthYear, '-', YearWidth::Four),
    template(Order::DayMonthYear, '.', YearWidth::Four),
    template(Order::MonthDayYear, '/', YearWidth::Four),
    template(Order::MonthDayYear, '-', YearWidth::Four),
    template(Order::MonthDayYear, '.', YearWidth::Four),
    template(Order::YearMonthDay, '/', YearWidth::Four),
    template(Order::YearMonthDay, '-', YearWidth::Four),
    template(Order::YearMonthDay, '.', YearWidth::Four),
    template(Order::DayMonthYear, '/', YearWidth::Two),
    template(Order::DayMonthYear, '-', YearWidth::Two),
    template(Order::DayMonthYear, '.', YearWidth::Two),
    template(Order::MonthDayYear, '/', YearWidth::Two),
    template(Order::MonthDayYear, '-', YearWidth::Two),
    template(Order::MonthDayYear, '.', YearWidth::Two),
    template(Order::YearMonthDay, '/', YearWidth::Two),
    template(Order::YearMonthDay, '-', YearWidth::Two),
    template(Order::YearMonthDay, '.', YearWidth::Two),
];

impl DateTemplate {
    fn parse(&self, input: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = input.split(self.separator).collect();
        if parts.len() != 3 {
            return None;
        }
        let (day, month, year) = match self.order {
            Order::DayMonthYear => (parts[0], parts[1], parts[2]),
            Order::MonthDayYear => (parts[1], parts[0], parts[2]),
            Order::YearMonthDay => (parts[2], parts[1], parts[0]),
        };
        let day = parse_digits(day, 1, 2)?;
        let month = parse_digits(month, 1, 2)?;
        let year = match self.year {
            YearWidth::Four => parse_digits(year, 4, 4)? as i32,
            YearWidth::Two => expand_two_digit_year(parse_digits(year, 2, 2)?),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn parse_digits(part: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if part.len() < min_len || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

// 69-99 belong to the 1900s, 00-68 to the 2000s.
fn expand_two_digit_year(year: u32) -> i32 {
    if year >= 69 {
        1900 + year as i32
    } else {
        2000 + year as i32
    }
}

/// Normalize a date-like string to `DD/MM/YYYY`.
///
/// The templates are tried in a fixed order and the first one that parses
/// wins, so `03/04/1990` is read as 3 April. When no template parses, the
/// string is split on `/`, `-` or `.` and read as day/month/year with a
/// two-digit year placed in the 2000s. If that is not a real calendar date
/// either, the input comes back unchanged.
pub fn normalize_date(date_str: &str) -> String {
    let input = date_str.trim();

    for template in DATE_TEMPLATES.iter() {
        if let Some(date) = template.parse(input) {
            return date.format("%d/%m/%Y").to_string();
        }
    }

    fallback_components(input).unwrap_or_else(|| date_str.to_string())
}

fn fallback_components(input: &str) -> Option<String> {
    let parts: Vec<&str> = DATE_SEPARATORS.split(input).collect();
    if parts.len() != 3 {
        return None;
    }

    let day = format!("{:0>2}", parts[0]);
    let month = format!("{:0>2}", parts[1]);
    let year = if parts[2].len() == 2 {
        format!("20{}", parts[2])
    } else {
        parts[2].to_string()
    };

    let d = parse_digits(&day, 2, 2)?;
    let m = parse_digits(&month, 2, 2)?;
    let y = parse_digits(&year, 4, 4)?;
    NaiveDate::from_ymd_opt(y as i32, m, d)?;

    Some(format!("{}/{}/{}", day, month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_input_is_unchanged() {
        assert_eq!(normalize_date("05/09/1998"), "05/09/1998");
        assert_eq!(normalize_date(&normalize_date("5.9.1998")), "05/09/1998");
    }

    #[test]
    fn test_year_first() {
        assert_eq!(normalize_date("1998-09-05"), "05/09/1998");
        assert_eq!(normalize_date("1998.9.5"), "05/09/1998");
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(normalize_date("5-9-98"), "05/09/1998");
        assert_eq!(normalize_date("05/09/21"), "05/09/2021");
    }

    #[test]
    fn test_day_first_wins_over_month_first() {
        assert_eq!(normalize_date("03/04/1990"), "03/04/1990");
        // Only valid month-first.
        assert_eq!(normalize_date("12/25/1990"), "25/12/1990");
    }

    #[test]
    fn test_mixed_separators_use_fallback() {
        assert_eq!(normalize_date("5/9-1998"), "05/09/1998");
        assert_eq!(normalize_date("5.9/21"), "05/09/2021");
    }

    #[test]
    fn test_invalid_dates_returned_unchanged() {
        assert_eq!(normalize_date("32/13/1998"), "32/13/1998");
        assert_eq!(normalize_date("31/02-1998"), "31/02-1998");
        assert_eq!(normalize_date("not a date"), "not a date");
        assert_eq!(normalize_date("1234 5678 9012"), "1234 5678 9012");
    }
}
