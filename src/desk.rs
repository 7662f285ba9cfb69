//! The state of the running service: one collection per record kind
//! plus the technician roster.

use std::sync::RwLock;

use log::{debug, info, o, Logger};
use serde::Serialize;
use time::Date;

use crate::errors::DeskError;
use crate::kinds::{
    Appointment, AppointmentStatus, Campaign, Complaint, ComplaintStatus, Issue, IssueStatus,
    Payment, Repair, Sms, SmsStatus,
};
use crate::query::{DateRange, Query};
use crate::record::{Kind, Record, RecordId};
use crate::roster::{Day, District, NewTechnician, Roster, Technician};
use crate::store::SharedCollection;

/// A kind of record the desk keeps a collection of.
pub trait Registered: Kind {
    fn collection(desk: &Desk) -> &SharedCollection<Self>;

    /// Searchable text for `record` that lives elsewhere on the desk.
    fn related_text(_record: &Record<Self>, _roster: &Roster) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! registered {
    ($($kind:ty => $field:ident),+ $(,)?) => {
        $(
            impl Registered for $kind {
                fn collection(desk: &Desk) -> &SharedCollection<Self> {
                    &desk.$field
                }
            }
        )+
    };
}

registered! {
    Complaint => complaints,
    Repair => repairs,
    Campaign => campaigns,
    Appointment => appointments,
    Payment => payments,
    Sms => sms,
}

impl Registered for Issue {
    fn collection(desk: &Desk) -> &SharedCollection<Self> {
        &desk.issues
    }

    fn related_text(record: &Record<Self>, roster: &Roster) -> Vec<String> {
        roster
            .name_of(&record.fields.technician_id)
            .map(|name| vec![name.to_owned()])
            .unwrap_or_default()
    }
}

/// The per-status counts of one collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub collection: &'static str,
    pub total: usize,
    pub statuses: Vec<StatusCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// The figures shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub collections: Vec<CollectionSummary>,
    pub technicians: usize,
}

impl Summary {
    pub fn collection(&self, name: &str) -> Option<&CollectionSummary> {
        self.collections.iter().find(|c| c.collection == name)
    }
}

/// How much of the work assigned to one technician is done.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechnicianReport {
    pub technician: Technician,

    /// Issues and appointments assigned to the technician.
    pub assigned: usize,

    /// Resolved issues and completed appointments.
    pub completed: usize,

    /// `completed` as a percentage of `assigned`; zero with nothing
    /// assigned.
    pub efficiency: f64,
}

/// Every collection of the service. The roster lock, when needed, is
/// always taken before a collection lock.
#[derive(Debug)]
pub struct Desk {
    logger: Logger,
    complaints: SharedCollection<Complaint>,
    issues: SharedCollection<Issue>,
    repairs: SharedCollection<Repair>,
    campaigns: SharedCollection<Campaign>,
    appointments: SharedCollection<Appointment>,
    payments: SharedCollection<Payment>,
    sms: SharedCollection<Sms>,
    roster: RwLock<Roster>,
}

impl Desk {
    /// Creates an empty desk.
    pub fn new(logger: Logger) -> Self {
        Desk {
            logger: logger.new(o!("component" => "desk")),
            complaints: SharedCollection::default(),
            issues: SharedCollection::default(),
            repairs: SharedCollection::default(),
            campaigns: SharedCollection::default(),
            appointments: SharedCollection::default(),
            payments: SharedCollection::default(),
            sms: SharedCollection::default(),
            roster: RwLock::new(Roster::new()),
        }
    }

    /// Creates a desk holding the sample data.
    pub fn with_fixtures(logger: Logger) -> Result<Self, DeskError> {
        let desk = Desk::new(logger);
        crate::fixtures::seed(&desk)?;

        let technicians = desk.read_roster(|r| r.len())?;
        info!(desk.logger, "Seeded fixtures"; "technicians" => technicians);

        Ok(desk)
    }

    pub fn create<K: Registered>(&self, fields: K) -> Result<Record<K>, DeskError> {
        let record = K::collection(self).write(|c| c.create(fields))?;
        debug!(self.logger, "Created record"; "collection" => K::COLLECTION, "id" => %record.id());

        Ok(record)
    }

    pub fn insert<K: Registered>(&self, record: Record<K>) -> Result<(), DeskError> {
        K::collection(self).write(|c| c.insert(record))?
    }

    pub fn get<K: Registered>(&self, id: &RecordId) -> Result<Record<K>, DeskError> {
        K::collection(self)
            .read(|c| c.get(id).cloned())?
            .ok_or_else(|| DeskError::not_found(K::COLLECTION, id))
    }

    /// Replaces the fields of a record and returns it.
    pub fn update<K: Registered>(&self, id: &RecordId, fields: K) -> Result<Record<K>, DeskError> {
        let record = K::collection(self)
            .write(|c| c.update(id, fields).cloned())?
            .ok_or_else(|| DeskError::not_found(K::COLLECTION, id))?;
        debug!(self.logger, "Updated record"; "collection" => K::COLLECTION, "id" => %id);

        Ok(record)
    }

    /// Replaces the status of a record and returns it.
    pub fn update_status<K: Registered>(
        &self,
        id: &RecordId,
        status: K::Status,
    ) -> Result<Record<K>, DeskError> {
        let record = K::collection(self)
            .write(|c| {
                if c.update_status(id, status) {
                    c.get(id).cloned()
                } else {
                    None
                }
            })?
            .ok_or_else(|| DeskError::not_found(K::COLLECTION, id))?;
        debug!(self.logger, "Updated status"; "collection" => K::COLLECTION, "id" => %id, "status" => %status);

        Ok(record)
    }

    /// See [`RecordCollection::toggle_status`](crate::collection::RecordCollection::toggle_status).
    pub fn toggle_status<K: Registered>(
        &self,
        id: &RecordId,
        from: K::Status,
        to: K::Status,
    ) -> Result<K::Status, DeskError> {
        let status = K::collection(self)
            .write(|c| c.toggle_status(id, from, to))?
            .ok_or_else(|| DeskError::not_found(K::COLLECTION, id))?;
        debug!(self.logger, "Toggled status"; "collection" => K::COLLECTION, "id" => %id, "status" => %status);

        Ok(status)
    }

    pub fn remove<K: Registered>(&self, id: &RecordId) -> Result<(), DeskError> {
        if K::collection(self).write(|c| c.remove(id))? {
            debug!(self.logger, "Removed record"; "collection" => K::COLLECTION, "id" => %id);
            Ok(())
        } else {
            Err(DeskError::not_found(K::COLLECTION, id))
        }
    }

    /// Returns the selected records in insertion order.
    pub fn query<K: Registered>(&self, query: &Query<K::Status>) -> Result<Vec<Record<K>>, DeskError> {
        self.read_roster(|roster| {
            K::collection(self).read(|c| c.query_with(query, |record| K::related_text(record, roster)))
        })?
    }

    pub fn count_by_status<K: Registered>(&self) -> Result<Vec<(K::Status, usize)>, DeskError> {
        K::collection(self).read(|c| c.count_by_status())
    }

    /// Flips a complaint between open and resolved.
    pub fn toggle_complaint(&self, id: &RecordId) -> Result<ComplaintStatus, DeskError> {
        self.toggle_status::<Complaint>(id, ComplaintStatus::Open, ComplaintStatus::Resolved)
    }

    /// Records an outgoing message from `sender` and marks it sent. A
    /// blank body is filled in from the template.
    pub fn send_sms(&self, sender: &str, sms: Sms) -> Result<Record<Sms>, DeskError> {
        let sms = sms.with_template_body();
        sms.validate()?;

        let record = self.sms.write(|c| {
            let mut record = c.create(sms);

            if c.update_status(record.id(), SmsStatus::Sent) {
                record.status = SmsStatus::Sent;
            }

            record
        })?;

        info!(self.logger, "Sent SMS";
            "sender" => sender,
            "id" => %record.id(),
            "recipient" => &record.fields().recipient,
            "template" => ?record.fields().template);

        Ok(record)
    }

    pub fn add_technician(&self, new: NewTechnician) -> Result<Technician, DeskError> {
        if new.name.trim().is_empty() {
            return Err(DeskError::MissingField("name"));
        }

        let technician = self.write_roster(|r| r.add(new))?;
        debug!(self.logger, "Added technician"; "id" => %technician.id, "name" => &technician.name);

        Ok(technician)
    }

    pub fn insert_technician(&self, technician: Technician) -> Result<(), DeskError> {
        self.write_roster(|r| r.insert(technician))?
    }

    pub fn technician(&self, id: &RecordId) -> Result<Technician, DeskError> {
        self.read_roster(|r| r.get(id).cloned())?
            .ok_or_else(|| DeskError::not_found("technicians", id))
    }

    /// The technicians in `district`, or all of them.
    pub fn technicians(&self, district: Option<District>) -> Result<Vec<Technician>, DeskError> {
        self.read_roster(|r| r.in_district(district))
    }

    /// The technicians who work on the weekday of `date`.
    pub fn available_technicians(&self, date: Date) -> Result<Vec<Technician>, DeskError> {
        let day = Day::from(date.weekday());
        self.read_roster(|r| r.available_on(day))
    }

    /// The appointments scheduled on `date`, whatever their time of day.
    pub fn appointments_on(&self, date: Date) -> Result<Vec<Record<Appointment>>, DeskError> {
        self.query::<Appointment>(&Query::all().with_date_range(DateRange::day(date)))
    }

    pub fn technician_report(&self, id: &RecordId) -> Result<TechnicianReport, DeskError> {
        let technician = self.technician(id)?;

        let (issues, resolved) = self.issues.read(|c| {
            tally(
                c.iter().filter(|r| &r.fields.technician_id == id),
                |r| r.status == IssueStatus::Resolved,
            )
        })?;
        let (appointments, completed) = self.appointments.read(|c| {
            tally(
                c.iter().filter(|r| &r.fields.technician_id == id),
                |r| r.status == AppointmentStatus::Completed,
            )
        })?;

        let assigned = issues + appointments;
        let completed = resolved + completed;
        let efficiency = if assigned == 0 {
            0.0
        } else {
            completed as f64 * 100.0 / assigned as f64
        };

        Ok(TechnicianReport {
            technician,
            assigned,
            completed,
            efficiency,
        })
    }

    pub fn summary(&self) -> Result<Summary, DeskError> {
        Ok(Summary {
            collections: vec![
                self.summarize::<Complaint>()?,
                self.summarize::<Issue>()?,
                self.summarize::<Repair>()?,
                self.summarize::<Campaign>()?,
                self.summarize::<Appointment>()?,
                self.summarize::<Payment>()?,
                self.summarize::<Sms>()?,
            ],
            technicians: self.read_roster(|r| r.len())?,
        })
    }

    fn summarize<K: Registered>(&self) -> Result<CollectionSummary, DeskError> {
        let counts = self.count_by_status::<K>()?;

        Ok(CollectionSummary {
            collection: K::COLLECTION,
            total: counts.iter().map(|(_, count)| count).sum(),
            statuses: counts
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status: status.to_string(),
                    count,
                })
                .collect(),
        })
    }

    fn read_roster<T>(&self, f: impl FnOnce(&Roster) -> T) -> Result<T, DeskError> {
        let guard = self.roster.read().map_err(|_| DeskError::LockPoisoned)?;
        Ok(f(&guard))
    }

    fn write_roster<T>(&self, f: impl FnOnce(&mut Roster) -> T) -> Result<T, DeskError> {
        let mut guard = self.roster.write().map_err(|_| DeskError::LockPoisoned)?;
        Ok(f(&mut guard))
    }
}

/// Counts the records and how many of them are `done`.
fn tally<'a, K: Kind>(
    records: impl Iterator<Item = &'a Record<K>>,
    done: impl Fn(&Record<K>) -> bool,
) -> (usize, usize) {
    records.fold((0, 0), |(total, finished), record| {
        (total + 1, finished + done(record) as usize)
    })
}

#[cfg(test)]
mod tests {
    use log::{o, Logger};
    use time::macros::date;

    use super::Desk;
    use crate::errors::DeskError;
    use crate::kinds::*;
    use crate::query::Query;
    use crate::record::{Record, RecordId};
    use crate::roster::{District, NewTechnician};

    fn logger() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    fn desk() -> Desk {
        Desk::with_fixtures(logger()).expect("seed desk")
    }

    fn ids<K>(records: &[Record<K>]) -> Vec<&str>
    where K: crate::record::Kind {
        records.iter().map(|r| r.id().as_str()).collect()
    }

    #[test]
    fn fixtures_are_loaded() {
        let summary = desk().summary().expect("summarize desk");

        let totals = summary
            .collections
            .iter()
            .map(|c| (c.collection, c.total))
            .collect::<Vec<_>>();

        assert_eq!(totals, vec![
            ("complaints", 2),
            ("issues", 2),
            ("repairs", 2),
            ("campaigns", 3),
            ("appointments", 2),
            ("payments", 3),
            ("sms", 0),
        ]);
        assert_eq!(summary.technicians, 3);

        let payments = summary.collection("payments").expect("payments summary");
        let counts = payments
            .statuses
            .iter()
            .map(|s| (s.status.as_str(), s.count))
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![("Completed", 1), ("Pending", 1), ("Failed", 1)]);
    }

    #[test]
    fn seeding_twice_fails() {
        let desk = desk();

        assert!(matches!(
            crate::fixtures::seed(&desk),
            Err(DeskError::DuplicateId(_))
        ));
    }

    #[test]
    fn issues_are_found_by_technician_name() {
        let desk = desk();

        let found = desk
            .query::<Issue>(&Query::text("jane"))
            .expect("query issues");

        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn payments_are_found_by_amount() {
        let desk = desk();

        let found = desk
            .query::<Payment>(&Query::text("300"))
            .expect("query payments");

        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn campaigns_are_filtered_on_their_run() {
        let desk = desk();

        let found = desk
            .query::<Campaign>(&Query::within(date!(2023 - 06 - 01), date!(2023 - 07 - 31)))
            .expect("query campaigns");

        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn appointments_are_filtered_on_their_day() {
        let desk = desk();

        let found = desk
            .query::<Appointment>(&Query::within(date!(2023 - 06 - 16), date!(2023 - 06 - 16)))
            .expect("query appointments");

        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn complaints_toggle_and_missing_ids_are_reported() {
        let desk = desk();
        let id = RecordId::from("1");

        assert_eq!(desk.toggle_complaint(&id).expect("toggle"), ComplaintStatus::Resolved);
        assert_eq!(desk.toggle_complaint(&id).expect("toggle"), ComplaintStatus::Open);

        let missing = RecordId::from("missing");
        assert!(matches!(
            desk.toggle_complaint(&missing),
            Err(DeskError::NotFound { collection: "complaints", .. })
        ));
        assert!(matches!(
            desk.remove::<Complaint>(&missing),
            Err(DeskError::NotFound { .. })
        ));
        assert!(matches!(desk.get::<Repair>(&missing), Err(DeskError::NotFound { .. })));
    }

    #[test]
    fn status_updates_are_visible_to_queries() {
        let desk = desk();
        let id = RecordId::from("2");

        let updated = desk
            .update_status::<Repair>(&id, RepairStatus::Completed)
            .expect("update repair");
        assert_eq!(updated.status(), RepairStatus::Completed);

        let completed = desk
            .query::<Repair>(&Query::all().with_status(RepairStatus::Completed))
            .expect("query repairs");
        assert_eq!(ids(&completed), vec!["2"]);
    }

    #[test]
    fn sent_messages_are_recorded() {
        let desk = desk();

        let sent = desk
            .send_sms("CAREDESK", Sms {
                recipient: "1234567890".to_owned(),
                template: Some(Template::Appointment),
                body: String::new(),
            })
            .expect("send sms");

        assert_eq!(sent.status(), SmsStatus::Sent);
        assert_eq!(sent.fields().body, Template::Appointment.default_body());
        assert_eq!(desk.get::<Sms>(sent.id()).expect("get sms"), sent);

        let blank = desk.send_sms("CAREDESK", Sms {
            recipient: "1234567890".to_owned(),
            template: None,
            body: "  ".to_owned(),
        });
        assert!(matches!(blank, Err(DeskError::MissingField("body"))));
        assert_eq!(desk.query::<Sms>(&Query::all()).expect("query sms").len(), 1);
    }

    #[test]
    fn reports_count_finished_work() {
        let desk = desk();
        let jane = RecordId::from("2");

        let report = desk.technician_report(&jane).expect("report on Jane Smith");
        assert_eq!(report.technician.name, "Jane Smith");
        assert_eq!((report.assigned, report.completed), (2, 0));
        assert_eq!(report.efficiency, 0.0);

        // both of her fixtures have the ID "2" too
        desk.update_status::<Issue>(&"2".into(), IssueStatus::Resolved)
            .expect("resolve issue");
        desk.update_status::<Appointment>(&"2".into(), AppointmentStatus::Completed)
            .expect("complete appointment");

        let report = desk.technician_report(&jane).expect("report on Jane Smith");
        assert_eq!((report.assigned, report.completed), (2, 2));
        assert_eq!(report.efficiency, 100.0);

        let idle = desk.technician_report(&"3".into()).expect("report on Bob Brown");
        assert_eq!((idle.assigned, idle.completed), (0, 0));
        assert_eq!(idle.efficiency, 0.0);

        assert!(matches!(
            desk.technician_report(&"missing".into()),
            Err(DeskError::NotFound { collection: "technicians", .. })
        ));
    }

    #[test]
    fn appointments_are_listed_by_day() {
        let desk = desk();

        let on_the_15th = desk
            .appointments_on(date!(2023 - 06 - 15))
            .expect("list appointments");
        assert_eq!(ids(&on_the_15th), vec!["1"]);

        assert!(desk
            .appointments_on(date!(2023 - 06 - 17))
            .expect("list appointments")
            .is_empty());
    }

    #[test]
    fn technicians_are_filtered() {
        let desk = desk();

        let added = desk
            .add_technician(NewTechnician {
                name: "Carol White".to_owned(),
                district: District::West,
                availability: Vec::new(),
            })
            .expect("add technician");

        let west = desk.technicians(Some(District::West)).expect("list technicians");
        assert_eq!(west, vec![added]);

        // 2023-06-15 is a Thursday
        let available = desk
            .available_technicians(date!(2023 - 06 - 15))
            .expect("list available technicians");
        let names = available.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Jane Smith", "Bob Brown"]);
    }
}
