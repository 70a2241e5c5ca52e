// End-to-end matching tests, pattern literal to capture views

use sregex::{Matcher, regex};

#[test]
fn test_construction() {
    let matcher = regex!(r"\w");

    assert_eq!(matcher.apply("a").to_view(), "a");
    assert!(!matcher.apply("0").is_accepted());
}

#[test]
fn test_star_operator() {
    let matcher = regex!("aa*");

    assert_eq!(matcher.apply("aaa").to_view(), "aaa");
    assert_eq!(matcher.apply("a").to_view(), "a");

    let aab = matcher.apply("aab");
    assert!(aab.is_accepted());
    assert_eq!(&aab[0], "aa");
}

#[test]
fn test_optional_operator() {
    let matcher = regex!("a[a-f]?");

    assert_eq!(matcher.apply("aaa").to_view(), "aa");
    assert!(matcher.apply("a").is_accepted());
    assert_eq!(matcher.apply("af").to_view(), "af");
}

#[test]
fn test_plus_operator() {
    let matcher = regex!("aa+");

    assert_eq!(matcher.apply("aaa").to_view(), "aaa");
    assert!(!matcher.apply("a").is_accepted());

    let aab = matcher.apply("aab");
    assert!(aab.is_accepted());
    assert_eq!(aab.to_view(), "aa");
}

#[test]
fn test_round_brackets() {
    let matcher = regex!("a(ab)+");

    assert!(!matcher.apply("aaa").is_accepted());
    assert!(!matcher.apply("a").is_accepted());
    assert_eq!(matcher.apply("aab").to_view(), "aab");
    assert_eq!(matcher.apply("aabab").to_view(), "aabab");
}

#[test]
fn test_braces() {
    let matcher = regex!("ab{2,10}c");

    assert!(matcher.apply("abbc").is_accepted());
    assert!(matcher.apply("abbbbbbbbbbc").is_accepted());
    assert!(!matcher.apply("abbbbbbbbbbbc").is_accepted());
    assert!(!matcher.apply("abc").is_accepted());

    let matcher = regex!("ab{2,}c");

    assert!(matcher.apply("abbc").is_accepted());
    assert!(matcher.apply("abbbbbbbbbbc").is_accepted());
    assert!(!matcher.apply("abc").is_accepted());

    let matcher = regex!("ab{2}c");

    assert!(matcher.apply("abbc").is_accepted());
    assert!(!matcher.apply("abbbbbbbbbbc").is_accepted());
    assert!(!matcher.apply("abc").is_accepted());
}

#[test]
fn test_nested_group_matching() {
    let found = regex!("a(a(b))cd").apply("aabcdef");

    assert!(found.is_accepted());
    assert_eq!(&found[0], "aabcd");
    assert_eq!(&found[1], "ab");
    assert_eq!(&found[2], "b");
}

#[test]
fn test_branched_group_matching() {
    let matcher = regex!("a(a|b)+");

    assert!(matcher.apply("aa").is_accepted());
    assert!(matcher.apply("ab").is_accepted());
    assert!(matcher.apply("abaab").is_accepted());

    let found = matcher.apply("aab");
    assert_eq!(&found[0], "aab");
    assert_eq!(&found[1], "b");
}

#[test]
fn test_ranged_square_bracket() {
    let matcher = regex!("(10[0-7]0)");

    let found = matcher.apply("274.06 102\t1000\t");
    assert_eq!(found.to_view(), "1000");
}

#[test]
fn test_group_matching_order() {
    // a repeated group reports its last completed try
    let found = regex!("a(a[a-g])+").apply("aabacad");

    assert!(found.is_accepted());
    assert_eq!(&found[0], "aabacad");
    assert_eq!(&found[1], "ad");
}

#[test]
fn test_group_matching_with_more_branches() {
    let matcher = regex!(r"\w(\w+)|(\d+)");

    let found = matcher.apply("abc");
    let [full, first, second] = found.to_array();

    assert_eq!(found.groups(), 2);
    assert_eq!(full, "abc");
    assert_eq!(first, "bc");
    assert!(second.is_empty());

    let [full, first, second] = matcher.apply("123").to_array();

    assert_eq!(full, "123");
    assert!(first.is_empty());
    assert_eq!(second, "123");
}

#[test]
fn test_iteration_on_group_matching_with_more_branches() {
    let matcher = regex!(r"\w(\w+)|(\d+)");

    let mut found = matcher.apply("abc123ab");
    let [full, first, second] = found.to_array();

    assert_eq!(found.groups(), 2);
    assert_eq!(full, "abc");
    assert_eq!(first, "bc");
    assert!(second.is_empty());

    found.next();
    let [full, first, second] = found.to_array();

    assert_eq!(full, "123");
    assert!(first.is_empty());
    assert_eq!(second, "123");

    found.next();
    let [full, first, second] = found.to_array();

    assert_eq!(full, "ab");
    assert_eq!(first, "b");
    assert!(second.is_empty());
}

#[test]
fn test_branch_order_wins_collisions() {
    // branches are tried in source order: the first branch matches at
    // the leftmost position and an overlapping longer branch never runs
    let matcher = regex!("aaa|a+");

    let found = matcher.apply("aaaa");
    assert_eq!(found.to_view(), "aaa");
}

#[test]
fn test_non_capturing_round_brackets() {
    let found = regex!("a(?:a(b))cd").apply("aabcdef");

    assert!(found.is_accepted());
    assert_eq!(&found[0], "aabcd");
    assert_eq!(&found[1], "b");
}

#[test]
fn test_iterating_matches() {
    let mut found = regex!("ab").apply("abaab");

    assert!(found.is_accepted());
    assert_eq!(&found[0], "ab");

    found.next();
    assert!(found.is_accepted());
    assert_eq!(&found[0], "ab");

    assert!(!found.next());
}

#[test]
fn test_square_brackets() {
    let matcher = regex!(r"a[\w\-]+");

    assert_eq!(matcher.apply("aaa").to_view(), "aaa");
    assert!(!matcher.apply("a").is_accepted());
    assert_eq!(matcher.apply("aa-b").to_view(), "aa-b");
    assert_eq!(matcher.apply("aab--ab").to_view(), "aab--ab");

    let found = matcher.apply("12aaba12");
    assert!(found.is_accepted());
    assert_eq!(found.to_view(), "aaba");
}

#[test]
fn test_hex_matching() {
    let matcher = regex!(r"a\x41");

    assert_eq!(matcher.apply("aA").to_view(), "aA");
    assert!(!matcher.apply("a").is_accepted());
}

#[test]
fn test_hex_string_matching() {
    let matcher = regex!(r"a\x{414141}");

    assert_eq!(matcher.apply("aAAA").to_view(), "aAAA");
    assert!(!matcher.apply("aAA").is_accepted());
}

#[test]
fn test_octal_matching() {
    let matcher = regex!(r"a\101");

    assert_eq!(matcher.apply("aA").to_view(), "aA");
    assert!(!matcher.apply("a").is_accepted());
}

#[test]
fn test_octal_string_matching() {
    let matcher = regex!(r"a\o{101101101}");

    assert_eq!(matcher.apply("aAAA").to_view(), "aAAA");
    assert!(!matcher.apply("aAA").is_accepted());
}

#[test]
fn test_start_anchor() {
    let matcher = regex!("^a");

    assert!(matcher.apply("abc").is_accepted());
    assert!(!matcher.apply("bc").is_accepted());
}

#[test]
fn test_end_anchor() {
    let matcher = regex!("a$");

    assert!(matcher.apply("a").is_accepted());
    assert!(!matcher.apply("abc").is_accepted());

    // the scan settles on the last position
    let found = matcher.apply("aabca");
    assert!(found.is_accepted());
    assert_eq!(&found[0], "a");
}

#[test]
fn test_range_matchers() {
    let matcher = regex!("a[a-fhm-o]+");

    assert_eq!(matcher.apply("aaa").to_view(), "aaa");
    assert!(!matcher.apply("a").is_accepted());
    assert_eq!(matcher.apply("aabfcno").to_view(), "aabfcno");
    assert_eq!(matcher.apply("aabahb").to_view(), "aabahb");

    let found = matcher.apply("baabazb");
    assert!(found.is_accepted());
    assert_eq!(&found[0], "aaba");
}

#[test]
fn test_multiple_branches() {
    let matcher = regex!("a|bc|cd|d");

    let mut found = matcher.apply("abcd");
    assert!(found.is_accepted());
    assert_eq!(&found[0], "a");

    assert!(found.next());
    assert_eq!(&found[0], "bc");

    assert!(found.next());
    assert_eq!(&found[0], "d");

    assert!(!found.next());
}

#[test]
fn test_negated_matchers() {
    let matcher = regex!("a[^a-fh]+");

    assert_eq!(matcher.apply("axx").to_view(), "axx");
    assert!(!matcher.apply("a").is_accepted());
    assert!(!matcher.apply("aaf").is_accepted());
    assert_eq!(matcher.apply("baggn").to_view(), "aggn");
}

#[test]
fn test_structured_decomposition() {
    let matcher = regex!(r"(\d+)-(\d+)-(\d+)");

    let [date, year, month, day] = matcher.apply("2023-01-01").to_array();

    assert_eq!(date, "2023-01-01");
    assert_eq!(year, "2023");
    assert_eq!(month, "01");
    assert_eq!(day, "01");
}

#[test]
fn test_general_use() {
    let matcher = regex!(r"[\w.\-]+@[\w\-]+\.[\w.]+");

    let email = "Test email <first.last@learnxinyminutes.com>";

    let found = matcher.apply(email);
    assert!(found.is_accepted());
    assert_eq!(&found[0], "first.last@learnxinyminutes.com");

    let matcher = regex!("\"(.*)\"");

    let found = matcher.apply("wrong \"match\"");
    assert!(found.is_accepted());
    assert_eq!(&found[0], "\"match\"");
    assert_eq!(&found[1], "match");
}

#[test]
fn test_lazy_and_greedy_plus() {
    let greedy = regex!("(a+)a").apply("aaaa");

    assert!(greedy.is_accepted());
    assert_eq!(&greedy[0], "aaaa");
    assert_eq!(&greedy[1], "aaa");

    let lazy = regex!("(a+?)a").apply("aaaa");

    assert!(lazy.is_accepted());
    assert_eq!(&lazy[0], "aa");
    assert_eq!(&lazy[1], "a");
}

#[test]
fn test_lazy_greedy_and_possessive_optional() {
    let greedy = regex!("a?a").apply("aa");

    assert!(greedy.is_accepted());
    assert_eq!(&greedy[0], "aa");

    let mut lazy = regex!("a??a").apply("aa");

    assert!(lazy.is_accepted());
    assert_eq!(&lazy[0], "a");
    lazy.next();
    assert!(lazy.is_accepted());
    assert_eq!(&lazy[0], "a");

    let possessive_matcher = regex!("a?+a");
    let possessive = possessive_matcher.apply("aa");

    assert!(possessive.is_accepted());
    assert_eq!(&possessive[0], "aa");

    assert!(!possessive_matcher.apply("a").is_accepted());
}

#[test]
fn test_lazy_greedy_and_possessive_braces() {
    let greedy = regex!("(a{1,})a").apply("aaaa");

    assert!(greedy.is_accepted());
    assert_eq!(&greedy[0], "aaaa");
    assert_eq!(&greedy[1], "aaa");

    let lazy = regex!("(a{1,}?)a").apply("aaaa");

    assert!(lazy.is_accepted());
    assert_eq!(&lazy[0], "aa");
    assert_eq!(&lazy[1], "a");

    let possessive = regex!("(a{1,}+)a").apply("aaaa");

    assert!(!possessive.is_accepted());
}

#[test]
fn test_star_accepts_empty() {
    let found = regex!("a*").apply("");

    assert!(found.is_accepted());
    assert_eq!(found.to_view(), "");
}

#[test]
fn test_empty_iteration_terminates() {
    // an empty match must not stall the iterator; at most |S| + 1
    // positions can report one
    let mut found = regex!("a*").apply("bb");

    let mut count = 1;
    while found.next() {
        count += 1;
        assert!(count <= 3);
    }
    assert_eq!(count, 3);
    assert_eq!(found.size(), 3);
    assert!(!found.next());
}

#[test]
fn test_iteration_starts_increase() {
    let query = "abab";
    let mut found = regex!("ab?").apply(query);

    let mut previous = None;
    loop {
        let offset = found.to_view().as_ptr() as usize - query.as_ptr() as usize;
        if let Some(previous) = previous {
            assert!(offset > previous);
        }
        previous = Some(offset);
        if !found.next() {
            break;
        }
    }
}

#[test]
fn test_determinism() {
    let matcher = regex!(r"(\w+)\d*");

    let first = matcher.apply("ab12cd").to_array();
    let second = matcher.apply("ab12cd").to_array();
    assert_eq!(first, second);
}

#[test]
fn test_size_counts_matches() {
    let mut found = regex!("a").apply("aaa");

    assert_eq!(found.size(), 1);
    found.next();
    found.next();
    assert_eq!(found.size(), 3);
    assert!(!found.next());
    assert_eq!(found.size(), 3);
}

#[test]
fn test_accessors_on_failed_match() {
    let found = regex!("(x)y").apply("abc");

    assert!(!found.is_accepted());
    assert_eq!(found.to_view(), "");
    assert_eq!(&found[0], "");
    assert_eq!(&found[1], "");
    assert_eq!(found.size(), 0);
    assert_eq!(found.groups(), 1);
}

static WORD: Matcher<1> = regex!(r"\w+");

#[test]
fn test_static_matcher() {
    // the whole tree lives in static storage; the matcher is shareable
    let found = WORD.apply("  hello  ");
    assert_eq!(found.to_view(), "hello");
}
