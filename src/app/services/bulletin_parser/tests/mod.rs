//! Test fixtures for the bulletin parser

use super::line_parser::LineLayout;
use super::magnitude::ScanWindow;
use crate::constants::bulletin_layout;

mod parser_tests;

/// Bulletin page with banner, header, separator and a mix of good and bad lines
pub fn create_test_page() -> String {
    [
        "<HTML><HEAD><TITLE>Son Depremler</TITLE></HEAD><BODY><pre>",
        "RECENT EARTHQUAKES IN TURKEY",
        "KOERI REGIONAL EARTHQUAKE-TSUNAMI MONITORING CENTER",
        "(QUICK EPICENTER DETERMINATIONS)",
        "",
        "Magnitude (ML) >= 1.0",
        " ",
        "Date       Time      Latit(N)  Long(E)   Depth(km)     MD   ML   Mw    Region",
        "---------- --------  --------  -------   ----------    ------------    --------------",
        "2024.01.15 14:30:00  40.9800   29.0200        7.5      -.-  4.2  -.-   SOME-PLACE (ISTANBUL)",
        "2024.01.15 14:12:41  39.1234   27.5432       12.3      -.-  2.1  -.-   SOGUCAK-SINDIRGI (BALIKESIR)",
        "2024.01.15 13:58:02  38.3512   38.1010        5.0      -.-  1.8  -.-   YESILYURT (MALATYA)",
        "2024.01.15 13:40:10  40.7000   29.9000        9.8      -.-  -.-  -.-   IZMIT KORFEZI-KOCAELI",
        "2024.01.15 13:20:00  40.0000",
        "2024.13.40 10:00:00  40.1000   29.1000        5.0      -.-  2.0  -.-   BAD DATE (BURSA)",
        "</pre></BODY></HTML>",
    ]
    .join("\n")
}

/// Line layout matching the default constants
pub fn default_line_layout() -> LineLayout {
    LineLayout {
        magnitude_scan: ScanWindow::default(),
        location_offset: bulletin_layout::LOCATION_OFFSET,
        default_location_start: bulletin_layout::DEFAULT_LOCATION_START,
        min_tokens: bulletin_layout::MIN_TOKENS,
    }
}
