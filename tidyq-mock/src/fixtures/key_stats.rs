const AAPL: [(&str, &str); 32] = [
    ("a", "119.30"),
    ("a2", "31,084,000"),
    ("a5", "500"),
    ("b", "119.28"),
    ("b4", "25.19"),
    ("c1", "+0.18"),
    ("c4", "USD"),
    ("d", "2.28"),
    ("d1", "1/13/2017"),
    ("e", "8.31"),
    ("e7", "8.91"),
    ("f6", "5.25B"),
    ("g", "118.81"),
    ("h", "119.62"),
    ("j", "89.47"),
    ("j1", "626.44B"),
    ("j4", "69.75B"),
    ("k", "119.93"),
    ("l1", "119.04"),
    ("m6", "+8.26%"),
    ("m8", "+4.12%"),
    ("n", "Apple Inc."),
    ("o", "119.11"),
    ("p", "119.25"),
    ("p2", "-0.18%"),
    ("q", "11/3/2016"),
    ("r", "14.32"),
    ("s6", "215.64B"),
    ("t8", "$134.90"),
    ("v", "26,111,948"),
    ("x", "NMS"),
    ("y", "1.91"),
];

const MSFT: [(&str, &str); 32] = [
    ("a", "62.72"),
    ("a2", "21,847,100"),
    ("a5", "1,200"),
    ("b", "62.70"),
    ("b4", "9.27"),
    ("c1", "+0.06"),
    ("c4", "USD"),
    ("d", "1.56"),
    ("d1", "1/13/2017"),
    ("e", "2.10"),
    ("e7", "3.12"),
    ("f6", "7.07B"),
    ("g", "62.12"),
    ("h", "62.87"),
    ("j", "48.04"),
    ("j1", "487.63B"),
    ("j4", "28.73B"),
    ("k", "64.10"),
    ("l1", "62.70"),
    ("m6", "+7.82%"),
    ("m8", "+2.03%"),
    ("n", "Microsoft Corporation"),
    ("o", "62.62"),
    ("p", "62.64"),
    ("p2", "+0.10%"),
    ("q", "11/15/2016"),
    ("r", "29.86"),
    ("s6", "85.69B"),
    ("t8", "$66.03"),
    ("v", "19,422,310"),
    ("x", "NMS"),
    ("y", "2.49"),
];

fn csv_cell(v: &str) -> String {
    if v.contains(',') || v.contains('"') || v.contains(' ') {
        format!("\"{}\"", v.replace('"', "\"\""))
    } else {
        v.to_string()
    }
}

/// One wide CSV row with a cell per requested tag, `N/A` for unknown tags.
///
/// `EMPTY` is a listed symbol with no statistics at all.
pub fn by_symbol(symbol: &str, tags: &[&str]) -> Option<String> {
    let table: &[(&str, &str)] = match symbol {
        "AAPL" => &AAPL,
        "MSFT" => &MSFT,
        "EMPTY" => &[],
        _ => return None,
    };
    let cells: Vec<String> = tags
        .iter()
        .map(|tag| {
            table
                .iter()
                .find(|(t, _)| t == tag)
                .map_or_else(|| "N/A".to_string(), |(_, v)| csv_cell(v))
        })
        .collect();
    Some(format!("{}\n", cells.join(",")))
}
