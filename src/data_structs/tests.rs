mod canon_tests {
    use std::str::FromStr;

    use crate::data_structs::canon::*;

    #[test]
    fn test_canon_partition() {
        assert_eq!(CANONICAL_BOOKS.len(), N_BOOKS);
        assert_eq!(testament_codes(Testament::Old).count(), N_OLD_TESTAMENT);
        assert_eq!(testament_codes(Testament::New).count(), N_NEW_TESTAMENT);
        assert_eq!(N_OLD_TESTAMENT + N_NEW_TESTAMENT, N_BOOKS);
    }

    #[test]
    fn test_canon_lookup() {
        assert_eq!(book_index("b.GEN"), Some(0));
        assert_eq!(book_index("b.MAT"), Some(N_OLD_TESTAMENT));
        assert_eq!(book_index("b.REV"), Some(N_BOOKS - 1));
        assert_eq!(book_index("b.XYZ"), None);

        let book = canonical_book("b.1CO").unwrap();
        assert_eq!(book.name, "1 Corinthians");
        assert_eq!(book.testament, Testament::New);
    }

    #[test]
    fn test_testament_from_str() {
        assert_eq!(Testament::from_str("OT").unwrap(), Testament::Old);
        assert_eq!(Testament::from_str("nt").unwrap(), Testament::New);
        assert_eq!(Testament::from_str("new").unwrap(), Testament::New);
        assert!(Testament::from_str("apocrypha").is_err());
        assert_eq!(Testament::Old.to_string(), "OT");
    }
}

mod frequency_tests {
    use crate::data_structs::FrequencyMap;

    #[test]
    fn test_from_iterator_counts() {
        let map: FrequencyMap<&str> = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(map.get(&"a"), 3);
        assert_eq!(map.get(&"b"), 1);
        assert_eq!(map.get(&"z"), 0);
        assert_eq!(map.total(), 5);
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_is_additive() {
        let left = FrequencyMap::from_counts([("x", 2), ("y", 1)]);
        let right = FrequencyMap::from_counts([("y", 4), ("z", 3)]);

        let merged = FrequencyMap::merged([left.clone(), right.clone()]);
        assert_eq!(merged.total(), left.total() + right.total());
        assert_eq!(merged, FrequencyMap::from_counts([("z", 3), ("y", 5), ("x", 2)]));

        let mut in_place = left;
        in_place.merge(&right);
        assert_eq!(in_place, merged);
    }

    #[test]
    fn test_sorted_keeps_tie_order() {
        let map = FrequencyMap::from_counts([("b", 1), ("a", 2), ("d", 1), ("c", 2)]);
        let sorted = map.sorted();
        assert_eq!(
            sorted.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]
        );
        assert_eq!(sorted, map);
        assert_eq!(map.most_common(1), vec![("a", 2)]);
    }

    #[test]
    fn test_empty_map() {
        let map = FrequencyMap::<char>::new();
        assert!(map.is_empty());
        assert_eq!(map.total(), 0);
        assert!(map.sorted().is_empty());
    }
}

mod collection_tests {
    use crate::data_structs::canon::Testament;
    use crate::data_structs::{
        Book,
        BookCollection,
        Chapter,
        Verse,
    };
    use crate::error::CorpusError;

    fn book(code: &str) -> Book {
        Book::new(
            code,
            vec![Chapter::new(
                format!("{code}.1"),
                vec![Verse::new(format!("{code}.1.1"), "word")],
            )],
        )
    }

    #[test]
    fn test_insert_canonical_order() {
        let mut collection = BookCollection::new();
        assert!(collection.is_empty());
        collection.insert(book("b.REV")).unwrap();
        collection.insert(book("b.GEN")).unwrap();
        collection.insert(book("b.MAT")).unwrap();

        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.codes().collect::<Vec<_>>(),
            vec!["b.GEN", "b.MAT", "b.REV"]
        );
        assert_eq!(collection.count_testament(Testament::Old), 1);
        assert_eq!(collection.count_testament(Testament::New), 2);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let mut collection = BookCollection::new();
        let err = collection.insert(book("b.TOB")).unwrap_err();
        assert!(matches!(err, CorpusError::SchemaViolation(_)));
        assert!(collection.get("b.TOB").is_err());
        assert!(!collection.contains("b.TOB"));
    }

    #[test]
    fn test_occupied_slot_rejected() {
        let mut collection = BookCollection::new();
        collection.insert(book("b.JOH")).unwrap();
        let err = collection.insert(book("b.JOH")).unwrap_err();
        assert!(matches!(err, CorpusError::SchemaViolation(_)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_assign_mismatched_code() {
        let mut collection = BookCollection::new();
        let err = collection.assign("b.ACT", book("b.ROM")).unwrap_err();
        assert!(matches!(err, CorpusError::SchemaViolation(_)));
        assert!(collection.get("b.ACT").unwrap().is_none());
    }

    #[test]
    fn test_subset_skips_empty_slots() {
        let mut collection = BookCollection::new();
        collection.insert(book("b.GEN")).unwrap();
        collection.insert(book("b.MAR")).unwrap();

        let subset = collection.subset(&["b.MAR", "b.LUK"]).unwrap();
        assert_eq!(subset.codes().collect::<Vec<_>>(), vec!["b.MAR"]);
        assert!(collection.subset(&["b.XXX"]).is_err());
        // The source collection is untouched.
        assert_eq!(collection.len(), 2);
    }
}

mod hierarchy_tests {
    use rstest::{
        fixture,
        rstest,
    };

    use crate::data_structs::{
        Bible,
        Book,
        BookCollection,
        Chapter,
        CorpusMetadata,
        FrequencyMap,
        FrequencySource,
        Verse,
    };

    fn metadata() -> CorpusMetadata {
        CorpusMetadata {
            language:            "English".to_string(),
            iso639:              "en".to_string(),
            lang_id:             "English".to_string(),
            script:              "Latin".to_string(),
            source:              "memory".to_string(),
            reported_word_count: 9,
            reported_byte_count: None,
        }
    }

    #[fixture]
    fn bible() -> Bible {
        let mut books = BookCollection::new();
        books
            .insert(Book::new("b.GEN", vec![Chapter::new("b.GEN.1", vec![
                Verse::new("b.GEN.1.1", "The cat sat."),
                Verse::new("b.GEN.1.2", "The dog ran."),
            ])]))
            .unwrap();
        books
            .insert(Book::new("b.MAT", vec![Chapter::new("b.MAT.1", vec![
                Verse::new("b.MAT.1.1", "A cat ran!"),
            ])]))
            .unwrap();
        Bible::new(metadata(), books)
    }

    #[rstest]
    fn test_token_frequency_example(bible: Bible) {
        let expected = FrequencyMap::from_counts([
            ("the".to_string(), 2),
            ("cat".to_string(), 2),
            ("sat".to_string(), 1),
            ("dog".to_string(), 1),
            ("ran".to_string(), 2),
            ("a".to_string(), 1),
        ]);
        assert_eq!(bible.token_frequency(), expected);
        assert_eq!(bible.token_count(), 9);
        assert_eq!(bible.unique_tokens().len(), 6);
    }

    #[rstest]
    fn test_counts_sum_over_children(bible: Bible) {
        let book_tokens: u64 = bible.books().iter().map(|b| b.token_count()).sum();
        let verse_tokens: u64 = bible.verses().map(|v| v.token_count()).sum();
        assert_eq!(bible.token_count(), book_tokens);
        assert_eq!(bible.token_count(), verse_tokens);

        let book_chars: u64 = bible.books().iter().map(|b| b.char_count()).sum();
        assert_eq!(bible.char_count(), book_chars);
        assert_eq!(bible.char_count(), "The cat sat.The dog ran.A cat ran!".len() as u64);
    }

    #[rstest]
    fn test_char_frequency_is_case_sensitive(bible: Bible) {
        let chars = bible.char_frequency();
        assert_eq!(chars.get(&'T'), 2);
        assert_eq!(chars.get(&'A'), 1);
        assert_eq!(chars.get(&'a'), 5);
        assert_eq!(chars.get(&' '), 6);
        assert_eq!(chars.get(&'!'), 1);
    }

    #[rstest]
    fn test_subset_matches_direct_computation(bible: Bible) {
        let subset = bible.subset(&["b.GEN"]).unwrap();
        let direct = bible.book("b.GEN").unwrap().unwrap().token_frequency();
        assert_eq!(subset.token_frequency(), direct);
        assert_eq!(subset.metadata(), bible.metadata());
        assert_eq!(bible.len(), 2);
    }

    #[rstest]
    fn test_testament_split(bible: Bible) {
        let nt = bible.new_testament().unwrap();
        let ot = bible.old_testament().unwrap();
        assert_eq!(nt.len(), 1);
        assert_eq!(ot.len(), 1);
        assert_eq!(nt.token_count() + ot.token_count(), bible.token_count());
    }

    #[rstest]
    fn test_map_text_keeps_layout(bible: Bible) {
        let meta = bible.metadata().derived(" upper", "_up");
        let mapped = bible
            .map_text(meta, |verse| verse.text().to_uppercase())
            .unwrap();
        assert_eq!(mapped.language(), "English upper");
        assert_eq!(mapped.metadata().iso639, "en_up");
        assert_eq!(mapped.verse_count(), bible.verse_count());
        assert_eq!(mapped.chapter_count(), bible.chapter_count());
        assert_eq!(mapped.token_frequency(), bible.token_frequency());
        assert_eq!(mapped.verses().next().unwrap().text(), "THE CAT SAT.");
    }

    #[test]
    fn test_empty_verse() {
        let verse = Verse::new("b.GEN.1.1", "   ");
        assert_eq!(verse.text(), "");
        assert!(verse.token_frequency().is_empty());
        assert_eq!(verse.char_count(), 0);
    }
}
