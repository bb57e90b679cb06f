use tracing::{debug, info};

use crate::{
    error::{HrError, HrResult},
    model::NewEmployee,
    service::EmployeeService,
};

const DEMO_EMPLOYEES: [(&str, &str, &str); 3] = [
    ("Ritesh", "Singh", "riteshsingh893@gmail.com"),
    ("Deep", "Singh", "deep.singh@gmail.com"),
    ("Ram", "Sharma", "ram.sharma@example.com"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

/// Inserts the demo employees, skipping emails that already exist.
pub async fn seed_demo(service: &EmployeeService) -> HrResult<SeedReport> {
    let mut report = SeedReport::default();
    for (first, last, email) in DEMO_EMPLOYEES {
        match service.get_by_email(email).await {
            Ok(existing) => {
                debug!(id = existing.id, email, "demo employee already present");
                report.skipped += 1;
                continue;
            }
            Err(HrError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }
        match service.create(NewEmployee::new(first, last, email)).await {
            Ok(_) => report.created += 1,
            // Another writer inserted the same email since the lookup.
            Err(HrError::DuplicateEmail { .. }) => report.skipped += 1,
            Err(err) => return Err(err),
        }
    }
    info!(created = report.created, skipped = report.skipped, "demo employees seeded");
    Ok(report)
}
