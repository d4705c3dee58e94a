use super::*;

#[test]
fn plain_text_line_endings_are_unified() {
    assert_eq!(normalize_raster_text("ab\r\ncd\ref\n"), "ab\ncd\nef");
    assert_eq!(normalize_raster_text("ab\ncd"), "ab\ncd");
}

#[test]
fn only_one_trailing_terminator_is_dropped() {
    assert_eq!(normalize_raster_text("ab\n\n"), "ab\n");
    assert_eq!(normalize_raster_text(""), "");
}

#[test]
fn table_cell_rows_split_on_br_variants() {
    let raw = "<table style=\"x\"><tr><td style=\"font-family:courier\">\
               .:&nbsp;#<br/>%@&nbsp;&nbsp;<BR>&amp;&lt;&gt;<br />\
               </td></tr></table>";
    assert_eq!(normalize_raster_text(raw), ".: #\n%@  \n&<>");
}

#[test]
fn literal_newlines_in_br_markup_are_formatting() {
    let raw = "<td>ab<br/>\ncd<br/>\n</td>";
    assert_eq!(normalize_raster_text(raw), "ab\ncd");
}

#[test]
fn markup_without_br_keeps_newline_rows() {
    let raw = "<pre>a&nbsp;b\r\nc&#35;d\n</pre>";
    assert_eq!(normalize_raster_text(raw), "a b\nc#d");
}

#[test]
fn inline_tags_are_stripped() {
    let raw = "<td><span class=\"c\">x</span>y<br><b>z</b></td>";
    assert_eq!(normalize_raster_text(raw), "xy\nz");
}

#[test]
fn numeric_and_named_entities_decode() {
    assert_eq!(normalize_raster_text("<td>&#64;&#x41;&#X2591;&quot;&apos;</td>"), "@A░\"'");
    assert_eq!(normalize_raster_text("<td>&#160;&#xA0;</td>"), "  ");
}

#[test]
fn unknown_entities_stay_literal() {
    assert_eq!(normalize_raster_text("<td>a&bogus;b&c</td>"), "a&bogus;b&c");
    assert_eq!(normalize_raster_text("<td>&#xZZ;</td>"), "&#xZZ;");
}

#[test]
fn angle_brackets_in_plain_ramps_are_not_markup() {
    assert_eq!(normalize_raster_text("<>.\n>><"), "<>.\n>><");
    assert_eq!(normalize_raster_text("a & b"), "a & b");
}

#[test]
fn tag_prefixes_do_not_match_longer_names() {
    let raw = "<tdx>keep<br>";
    assert_eq!(normalize_raster_text(raw), "keep");
}
