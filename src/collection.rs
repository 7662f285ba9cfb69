use time::OffsetDateTime;

use crate::errors::DeskError;
use crate::query::Query;
use crate::record::{Kind, Record, RecordId, Status};

/// An insertion-ordered list of records of one kind.
///
/// Lookups by ID are linear scans; collections are expected to stay
/// small. "Not found" is reported through the return value and never
/// leaves a partial mutation behind.
#[derive(Clone, Debug)]
pub struct RecordCollection<K: Kind> {
    records: Vec<Record<K>>,
}

impl<K: Kind> Default for RecordCollection<K> {
    fn default() -> Self {
        RecordCollection {
            records: Vec::new(),
        }
    }
}

impl<K: Kind> RecordCollection<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record with a fresh ID, the kind’s initial status
    /// and the current time.
    pub fn create(&mut self, fields: K) -> Record<K> {
        self.create_at(fields, OffsetDateTime::now_utc())
    }

    /// The same as [`create`](Self::create), with an explicit creation
    /// time.
    pub fn create_at(&mut self, fields: K, created_at: OffsetDateTime) -> Record<K> {
        let id = self.fresh_id();
        let record = Record::new(id, K::INITIAL_STATUS, created_at, fields);

        self.records.push(record.clone());

        record
    }

    /// Appends a record that already carries its ID.
    pub fn insert(&mut self, record: Record<K>) -> Result<(), DeskError> {
        if self.contains(&record.id) {
            return Err(DeskError::DuplicateId(record.id));
        }

        self.records.push(record);

        Ok(())
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record<K>> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the fields of a record, keeping its ID, status, creation
    /// time and position. Returns the updated record.
    pub fn update(&mut self, id: &RecordId, fields: K) -> Option<&Record<K>> {
        let record = self.find_mut(id)?;
        record.fields = fields;

        Some(&*record)
    }

    /// Replaces the status of a record. Any status may replace any
    /// other. Returns `false` if there is no such record.
    #[must_use]
    pub fn update_status(&mut self, id: &RecordId, status: K::Status) -> bool {
        match self.find_mut(id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Moves a record in status `from` to status `to`, and a record in
    /// any other status to `from`. Returns the new status.
    pub fn toggle_status(&mut self, id: &RecordId, from: K::Status, to: K::Status) -> Option<K::Status> {
        let record = self.find_mut(id)?;
        record.status = if record.status == from { to } else { from };

        Some(record.status)
    }

    /// Removes a record, keeping the others in order. Returns `false`
    /// if there is no such record.
    #[must_use]
    pub fn remove(&mut self, id: &RecordId) -> bool {
        match self.records.iter().position(|r| &r.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns copies of the selected records in insertion order.
    pub fn query(&self, query: &Query<K::Status>) -> Vec<Record<K>> {
        self.query_with(query, |_| Vec::new())
    }

    /// The same as [`query`](Self::query), with extra searchable text
    /// for each record supplied by `related`.
    pub fn query_with<F>(&self, query: &Query<K::Status>, related: F) -> Vec<Record<K>>
    where F: Fn(&Record<K>) -> Vec<String> {
        let matcher = query.matcher();

        self.records
            .iter()
            .filter(|record| matcher.matches(*record, &related(*record)))
            .cloned()
            .collect()
    }

    /// Counts the records in each status, in the status set’s order.
    pub fn count_by_status(&self) -> Vec<(K::Status, usize)> {
        <K::Status as Status>::ALL
            .iter()
            .map(|status| {
                let count = self.records.iter().filter(|r| r.status == *status).count();
                (*status, count)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record<K>> {
        self.records.iter()
    }

    fn find_mut(&mut self, id: &RecordId) -> Option<&mut Record<K>> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();

            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use time::macros::{date, datetime};

    use super::RecordCollection;
    use crate::errors::DeskError;
    use crate::kinds::complaint::{Complaint, ComplaintStatus};
    use crate::kinds::repair::{Repair, RepairStatus};
    use crate::query::Query;
    use crate::record::{Record, RecordId};

    fn complaint(user_name: &str) -> Complaint {
        Complaint {
            icno: "123456".to_owned(),
            mobile: "1234567890".to_owned(),
            wrong_icno: "654321".to_owned(),
            user_name: user_name.to_owned(),
        }
    }

    fn names(records: &[Record<Complaint>]) -> Vec<String> {
        records.iter().map(|r| r.fields.user_name.clone()).collect()
    }

    fn collection_of(users: &[&str]) -> RecordCollection<Complaint> {
        let mut collection = RecordCollection::new();

        for user in users {
            collection.create(complaint(user));
        }

        collection
    }

    #[test]
    fn creation_assigns_initial_status_and_time() {
        let mut collection = RecordCollection::<Repair>::new();
        let record = collection.create_at(
            Repair {
                icno: "123456".to_owned(),
                mobile: "1234567890".to_owned(),
                user_name: "John Doe".to_owned(),
                stb_model: "Model X".to_owned(),
                issue_description: "No signal".to_owned(),
            },
            datetime!(2023-06-01 10:00 UTC),
        );

        assert_eq!(record.status(), RepairStatus::Pending);
        assert_eq!(record.created_at(), datetime!(2023-06-01 10:00 UTC));
        assert_eq!(collection.get(record.id()), Some(&record));
    }

    #[test]
    fn text_query_selects_matches_only() {
        let collection = collection_of(&["Alice Johnson", "Bob Williams"]);

        let results = collection.query(&Query::text("alice"));

        assert_eq!(names(&results), vec!["Alice Johnson"]);
    }

    #[test]
    fn date_query_is_inclusive() {
        let mut collection = RecordCollection::new();
        collection.create_at(complaint("John Doe"), datetime!(2023-06-01 00:00 UTC));

        let may_june = Query::within(date!(2023 - 05 - 01), date!(2023 - 06 - 30));
        let july = Query::within(date!(2023 - 07 - 01), date!(2023 - 07 - 31));

        assert_eq!(collection.query(&may_june).len(), 1);
        assert!(collection.query(&july).is_empty());
    }

    #[test]
    fn status_update_changes_status_only() {
        let mut collection = collection_of(&["John Doe", "Alice Johnson"]);
        let before: Vec<_> = collection.iter().cloned().collect();
        let id = before[1].id.clone();

        assert!(collection.update_status(&id, ComplaintStatus::Resolved));

        let after: Vec<_> = collection.iter().cloned().collect();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].status, ComplaintStatus::Resolved);
        assert_eq!(after[1].id, before[1].id);
        assert_eq!(after[1].fields, before[1].fields);
        assert_eq!(after[1].created_at, before[1].created_at);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut collection = collection_of(&["John Doe", "Alice Johnson"]);
        let before: Vec<_> = collection.iter().cloned().collect();
        let missing = RecordId::from("missing");

        assert!(!collection.update_status(&missing, ComplaintStatus::Resolved));
        assert!(!collection.remove(&missing));
        assert!(collection.update(&missing, complaint("Nobody")).is_none());
        assert!(collection
            .toggle_status(&missing, ComplaintStatus::Open, ComplaintStatus::Resolved)
            .is_none());

        let after: Vec<_> = collection.iter().cloned().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn removal_is_not_repeatable() {
        let mut collection = collection_of(&["John Doe", "Alice Johnson", "Bob Williams"]);
        let id = collection.iter().nth(1).map(|r| r.id.clone()).expect("second record");

        assert!(collection.remove(&id));
        assert!(!collection.remove(&id));
        assert_eq!(
            names(&collection.query(&Query::all())),
            vec!["John Doe", "Bob Williams"]
        );
    }

    #[test]
    fn toggling_flips_between_two_statuses() {
        let mut collection = collection_of(&["John Doe"]);
        let id = collection.iter().next().map(|r| r.id.clone()).expect("record");
        let (open, resolved) = (ComplaintStatus::Open, ComplaintStatus::Resolved);

        assert_eq!(collection.toggle_status(&id, open, resolved), Some(resolved));
        assert_eq!(collection.toggle_status(&id, open, resolved), Some(open));
    }

    #[test]
    fn updates_replace_fields_in_place() {
        let mut collection = collection_of(&["John Doe", "Alice Johnson"]);
        let id = collection.iter().next().map(|r| r.id.clone()).expect("record");

        let updated = collection
            .update(&id, complaint("Jonathan Doe"))
            .cloned()
            .expect("updated record");

        assert_eq!(updated.status, ComplaintStatus::Open);
        assert_eq!(
            names(&collection.query(&Query::all())),
            vec!["Jonathan Doe", "Alice Johnson"]
        );
    }

    #[test]
    fn inserting_a_taken_id_fails() {
        let mut collection = RecordCollection::new();
        let record = Record::new(
            "1".into(),
            ComplaintStatus::Open,
            datetime!(2023-06-01 00:00 UTC),
            complaint("John Doe"),
        );

        collection.insert(record.clone()).expect("insert first record");
        let result = collection.insert(record);

        assert!(matches!(result, Err(DeskError::DuplicateId(id)) if id.as_str() == "1"));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn results_do_not_alias_storage() {
        let collection = collection_of(&["John Doe"]);

        let mut results = collection.query(&Query::all());
        results.clear();

        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn statuses_are_counted_in_order() {
        let mut collection = collection_of(&["John Doe", "Alice Johnson", "Bob Williams"]);
        let id = collection.iter().next().map(|r| r.id.clone()).expect("record");
        assert!(collection.update_status(&id, ComplaintStatus::Resolved));

        assert_eq!(
            collection.count_by_status(),
            vec![(ComplaintStatus::Open, 2), (ComplaintStatus::Resolved, 1)]
        );
    }

    #[test]
    fn end_to_end_complaint_flow() {
        let mut collection = RecordCollection::new();
        collection.create(complaint("John Doe"));
        let alice = collection.create(complaint("Alice Johnson"));
        assert!(collection.update_status(alice.id(), ComplaintStatus::Resolved));

        let found = collection.query(&Query::text("alice"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fields.user_name, "Alice Johnson");
        assert_eq!(found[0].status, ComplaintStatus::Resolved);

        assert!(collection.update_status(found[0].id(), ComplaintStatus::Open));

        let open = collection.query(&Query::all().with_status(ComplaintStatus::Open));
        assert_eq!(names(&open), vec!["John Doe", "Alice Johnson"]);
    }

    proptest! {
        #[test]
        fn created_ids_are_unique(users in prop::collection::vec("[a-zA-Z ]{0,12}", 0..40)) {
            let mut collection = RecordCollection::new();

            let ids: HashSet<_> = users
                .iter()
                .map(|user| collection.create(complaint(user)).id)
                .collect();

            prop_assert_eq!(collection.len(), users.len());
            prop_assert_eq!(ids.len(), users.len());
        }

        #[test]
        fn empty_text_selects_everything_in_order(users in prop::collection::vec("[a-zA-Z ]{0,12}", 0..40)) {
            let mut collection = RecordCollection::new();

            for user in &users {
                collection.create(complaint(user));
            }

            prop_assert_eq!(names(&collection.query(&Query::text(""))), users);
        }

        #[test]
        fn text_query_is_substring_match(
            users in prop::collection::vec("[a-zA-Z]{1,8}", 1..20),
            needle in "[a-zA-Z]{1,3}",
        ) {
            let mut collection = RecordCollection::new();

            for user in &users {
                collection.create(complaint(user));
            }

            let expected: Vec<String> = users
                .iter()
                .filter(|user| user.to_lowercase().contains(&needle.to_lowercase()))
                .cloned()
                .collect();

            prop_assert_eq!(names(&collection.query(&Query::text(needle.clone()))), expected);
        }

        #[test]
        fn removal_preserves_order(
            users in prop::collection::vec("[a-zA-Z]{1,8}", 1..20),
            index in any::<prop::sample::Index>(),
        ) {
            let mut collection = RecordCollection::new();

            for user in &users {
                collection.create(complaint(user));
            }

            let index = index.index(users.len());
            let id = collection.iter().nth(index).map(|r| r.id.clone()).unwrap();

            prop_assert!(collection.remove(&id));

            let mut expected = users.clone();
            expected.remove(index);

            prop_assert_eq!(collection.len(), users.len() - 1);
            prop_assert_eq!(names(&collection.query(&Query::all())), expected);
        }
    }
}
