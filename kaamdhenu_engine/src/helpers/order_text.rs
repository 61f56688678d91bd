//! The free-text order grammar.
//!
//! A full order sheet has at least 3 non-empty lines: exactly one starting with `Name:`, exactly one starting
//! with `Address:` (labels are case-sensitive and must be at the start of the line), and any number of item
//! lines. An item line carries five whitespace-separated tokens:
//!
//! ```text
//! <product name> <quantity> <district> <added-by> <unique number>
//! ```
//!
//! Item-line parsing is deliberately lenient: a line with fewer than five tokens, or whose numeric tokens do
//! not parse, is dropped silently so a partially-typed line never blocks the rest of the sheet. Tokens past
//! the fifth are ignored.

const NAME_LABEL: &str = "Name:";
const ADDRESS_LABEL: &str = "Address:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSheet {
    pub name: String,
    pub address: String,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product: String,
    pub quantity: i64,
    pub district: String,
    pub added_by: String,
    pub unique_number: i64,
}

/// Parse a full order sheet. Returns `None` (not an error) when the sheet is too short or a label line is
/// missing or duplicated; callers fall back to manual entry in that case.
pub fn parse_order_sheet(text: &str) -> Option<OrderSheet> {
    let lines: Vec<&str> = text.trim().lines().collect();
    if lines.iter().filter(|l| !l.trim().is_empty()).count() < 3 {
        return None;
    }
    let mut names = lines.iter().filter(|l| l.starts_with(NAME_LABEL));
    let mut addresses = lines.iter().filter(|l| l.starts_with(ADDRESS_LABEL));
    let (name, address) = match (names.next(), names.next(), addresses.next(), addresses.next()) {
        (Some(n), None, Some(a), None) => {
            (n.trim_start_matches(NAME_LABEL).trim(), a.trim_start_matches(ADDRESS_LABEL).trim())
        },
        _ => return None,
    };
    let items = lines
        .iter()
        .filter(|l| !l.starts_with(NAME_LABEL) && !l.starts_with(ADDRESS_LABEL))
        .filter_map(|l| parse_item_line(l))
        .collect();
    Some(OrderSheet { name: name.to_string(), address: address.to_string(), items })
}

/// Parse item lines only. This is what order intake runs over `order_details`, which by the submission
/// contract carries no label lines.
pub fn parse_item_lines(text: &str) -> Vec<OrderLine> {
    text.lines().filter_map(parse_item_line).collect()
}

fn parse_item_line(line: &str) -> Option<OrderLine> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return None;
    }
    let quantity = tokens[1].parse().ok()?;
    let unique_number = tokens[4].parse().ok()?;
    Some(OrderLine {
        product: tokens[0].to_string(),
        quantity,
        district: tokens[2].to_string(),
        added_by: tokens[3].to_string(),
        unique_number,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const SHEET: &str = "Name: John Doe\nAddress: 123 Main Street, Ward 5\nPotato 2 SouthDelhi 6338398272 1\nTomato 1 CentralDelhi 1770010257 1";

    #[test]
    fn parses_a_full_sheet() {
        let sheet = parse_order_sheet(SHEET).unwrap();
        assert_eq!(sheet.name, "John Doe");
        assert_eq!(sheet.address, "123 Main Street, Ward 5");
        assert_eq!(sheet.items.len(), 2);
        assert_eq!(sheet.items[0], OrderLine {
            product: "Potato".to_string(),
            quantity: 2,
            district: "SouthDelhi".to_string(),
            added_by: "6338398272".to_string(),
            unique_number: 1,
        });
    }

    #[test]
    fn too_few_lines_is_no_result() {
        assert!(parse_order_sheet("Name: A\nAddress: B").is_none());
        assert!(parse_order_sheet("").is_none());
        // Blank lines don't count towards the minimum
        assert!(parse_order_sheet("Name: A\n\n\nAddress: B").is_none());
    }

    #[test]
    fn missing_or_duplicated_labels_is_no_result() {
        assert!(parse_order_sheet("Name: A\nPotato 2 SouthDelhi 6338398272 1\nRice 1 Chennai 1728097771 1").is_none());
        assert!(parse_order_sheet("Address: B\nPotato 2 SouthDelhi 6338398272 1\nRice 1 Chennai 1728097771 1").is_none());
        assert!(parse_order_sheet("Name: A\nName: B\nAddress: C\nPotato 2 SouthDelhi 6338398272 1").is_none());
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!(parse_order_sheet("name: A\nAddress: B\nPotato 2 SouthDelhi 6338398272 1").is_none());
    }

    #[test]
    fn short_item_lines_are_dropped_not_fatal() {
        let sheet = parse_order_sheet("Name: A\nAddress: B\nPotato 2 SouthDelhi\nRice 1 Chennai 1728097771 1").unwrap();
        assert_eq!(sheet.items.len(), 1);
        assert_eq!(sheet.items[0].product, "Rice");
    }

    #[test]
    fn unparseable_numbers_drop_the_line() {
        let lines = parse_item_lines("Potato two SouthDelhi 6338398272 1\nPotato 2 SouthDelhi 6338398272 one");
        assert!(lines.is_empty());
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let lines = parse_item_lines("Potato 2 SouthDelhi 6338398272 1 trailing words");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unique_number, 1);
    }

    #[test]
    fn item_lines_split_on_any_whitespace() {
        let lines = parse_item_lines("Potato\t2  SouthDelhi   6338398272 1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].added_by, "6338398272");
    }
}
