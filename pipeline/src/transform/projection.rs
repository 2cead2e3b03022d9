//! Split raw campaign rows into the `client`, `campaign` and `economics` tables.
//!
//! Every rule is per-row; the three projections share nothing but the input.
//!
//! ```text
//! RawRecord ─┬─▶ project_client    ─▶ ClientRecord
//!            ├─▶ project_campaign  ─▶ CampaignRecord (+ data-quality issues)
//!            └─▶ project_economics ─▶ EconomicsRecord
//! ```

use serde::Serialize;

use super::operations::{apply_all, binary, parse_month, EDUCATION_OPERATIONS, JOB_OPERATIONS};
use crate::error::{TransformError, TransformResult};
use crate::models::{
    CampaignRecord, ClientRecord, ContactDate, DataQualityIssue, EconomicsRecord, RawRecord,
};

/// Options for the transformer
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformOptions {
    /// Fail on the first unrecognized month instead of reporting it
    pub strict_months: bool,
}

/// The three cleaned tables, row-aligned with the input.
#[derive(Debug, Clone, Default)]
pub struct CampaignTables {
    pub client: Vec<ClientRecord>,
    pub campaign: Vec<CampaignRecord>,
    pub economics: Vec<EconomicsRecord>,
    /// Non-fatal findings, in input order
    pub issues: Vec<DataQualityIssue>,
}

impl CampaignTables {
    /// Rows per table. All three tables always have the same length.
    pub fn len(&self) -> usize {
        self.client.len()
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "client: {} rows, campaign: {} rows, economics: {} rows, {} data-quality issues",
            self.client.len(),
            self.campaign.len(),
            self.economics.len(),
            self.issues.len()
        )
    }
}

/// Project a raw row onto the `client` table.
pub fn project_client(raw: &RawRecord) -> ClientRecord {
    ClientRecord {
        client_id: raw.client_id,
        age: raw.age,
        job: apply_all(JOB_OPERATIONS, raw.job.as_deref()),
        marital: raw.marital.clone(),
        education: apply_all(EDUCATION_OPERATIONS, raw.education.as_deref()),
        credit_default: binary(raw.credit_default.as_deref(), "yes"),
        mortgage: binary(raw.mortgage.as_deref(), "yes"),
    }
}

/// Project a raw row onto the `campaign` table.
///
/// `day` and `month` are folded into `last_contact_date`, which is `None`
/// when the month is not recognized.
pub fn project_campaign(raw: &RawRecord) -> CampaignRecord {
    CampaignRecord {
        client_id: raw.client_id,
        number_contacts: raw.number_contacts,
        contact_duration: raw.contact_duration,
        previous_campaign_contacts: raw.previous_campaign_contacts,
        previous_outcome: binary(raw.previous_outcome.as_deref(), "success"),
        campaign_outcome: binary(raw.campaign_outcome.as_deref(), "yes"),
        last_contact_date: contact_date(raw.day, raw.month.as_deref()),
    }
}

/// Project a raw row onto the `economics` table.
pub fn project_economics(raw: &RawRecord) -> EconomicsRecord {
    EconomicsRecord {
        client_id: raw.client_id,
        cons_price_idx: raw.cons_price_idx,
        euribor_three_months: raw.euribor_three_months,
    }
}

/// Build the last-contact date from a day number and a month token.
pub fn contact_date(day: u32, month: Option<&str>) -> Option<ContactDate> {
    month
        .and_then(parse_month)
        .map(|month| ContactDate::new(month, day))
}

/// Applies the three projections to a merged input.
#[derive(Debug, Clone, Default)]
pub struct CampaignTransformer {
    options: TransformOptions,
}

impl CampaignTransformer {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform every row. Output tables preserve input order and length.
    ///
    /// Fails on empty input, and in strict mode on the first unrecognized month.
    pub fn transform(&self, records: &[RawRecord]) -> TransformResult<CampaignTables> {
        if records.is_empty() {
            return Err(TransformError::EmptyInput);
        }

        let mut tables = CampaignTables {
            client: Vec::with_capacity(records.len()),
            campaign: Vec::with_capacity(records.len()),
            economics: Vec::with_capacity(records.len()),
            issues: Vec::new(),
        };

        for (row, raw) in records.iter().enumerate() {
            let campaign = project_campaign(raw);
            self.check_contact_date(row, raw, &campaign, &mut tables.issues)?;

            tables.client.push(project_client(raw));
            tables.campaign.push(campaign);
            tables.economics.push(project_economics(raw));
        }

        Ok(tables)
    }

    fn check_contact_date(
        &self,
        row: usize,
        raw: &RawRecord,
        campaign: &CampaignRecord,
        issues: &mut Vec<DataQualityIssue>,
    ) -> TransformResult<()> {
        match campaign.last_contact_date {
            None if self.options.strict_months => Err(TransformError::UnrecognizedMonth {
                row,
                client_id: raw.client_id,
                value: raw.month.clone().unwrap_or_default(),
            }),
            None => {
                issues.push(DataQualityIssue::UnrecognizedMonth {
                    row,
                    client_id: raw.client_id,
                    value: raw.month.clone(),
                });
                Ok(())
            }
            Some(date) if !date.is_calendar_date() => {
                issues.push(DataQualityIssue::ImpossibleDate {
                    row,
                    client_id: raw.client_id,
                    date: date.to_string(),
                });
                Ok(())
            }
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn raw(client_id: i64) -> RawRecord {
        RawRecord {
            client_id,
            age: 41,
            job: Some("blue-collar.".into()),
            marital: Some("married".into()),
            education: Some("basic.4y".into()),
            credit_default: Some("yes".into()),
            mortgage: Some("no".into()),
            number_contacts: 2,
            contact_duration: 261,
            previous_campaign_contacts: 0,
            previous_outcome: Some("nonexistent".into()),
            campaign_outcome: Some("no".into()),
            day: 5,
            month: Some("may".into()),
            cons_price_idx: 93.994,
            euribor_three_months: 4.857,
        }
    }

    #[test]
    fn test_client_projection_scenario() {
        let client = project_client(&raw(7));
        assert_eq!(
            client,
            ClientRecord {
                client_id: 7,
                age: 41,
                job: Some("blue_collar".into()),
                marital: Some("married".into()),
                education: Some("basic_4y".into()),
                credit_default: 1,
                mortgage: 0,
            }
        );
    }

    #[test]
    fn test_unknown_education_is_missing() {
        let mut r = raw(1);
        r.education = Some("unknown".into());
        assert_eq!(project_client(&r).education, None);
    }

    #[test]
    fn test_campaign_projection() {
        let mut r = raw(3);
        r.previous_outcome = Some("success".into());
        r.campaign_outcome = Some("yes".into());
        let campaign = project_campaign(&r);

        assert_eq!(campaign.client_id, 3);
        assert_eq!(campaign.number_contacts, 2);
        assert_eq!(campaign.contact_duration, 261);
        assert_eq!(campaign.previous_outcome, 1);
        assert_eq!(campaign.campaign_outcome, 1);
        assert_eq!(
            campaign.last_contact_date.map(|d| d.to_string()).as_deref(),
            Some("2022-05-05")
        );
    }

    #[test]
    fn test_contact_date_composition() {
        let render = |day, month| contact_date(day, Some(month)).map(|d| d.to_string());
        assert_eq!(render(5, "JAN").as_deref(), Some("2022-01-05"));
        assert_eq!(render(31, "dec").as_deref(), Some("2022-12-31"));
        assert_eq!(render(12, "Oct").as_deref(), Some("2022-10-12"));
        assert_eq!(render(1, "sept"), None);
        assert_eq!(contact_date(1, None), None);
    }

    #[test]
    fn test_economics_projection_verbatim() {
        let e = project_economics(&raw(9));
        assert_eq!(e.client_id, 9);
        assert_eq!(e.cons_price_idx, 93.994);
        assert_eq!(e.euribor_three_months, 4.857);
    }

    #[test]
    fn test_binary_columns_for_arbitrary_text() {
        let mut r = raw(1);
        for text in ["yes", "no", "unknown", "Yes", "success", "", "☃"] {
            r.credit_default = Some(text.into());
            r.mortgage = Some(text.into());
            r.previous_outcome = Some(text.into());
            r.campaign_outcome = Some(text.into());
            let client = project_client(&r);
            let campaign = project_campaign(&r);
            for flag in [
                client.credit_default,
                client.mortgage,
                campaign.previous_outcome,
                campaign.campaign_outcome,
            ] {
                assert!(flag <= 1);
            }
        }
    }

    #[test]
    fn test_transform_preserves_rows_and_ids() {
        let records: Vec<RawRecord> = [4, 7, 7, 1, 4].into_iter().map(raw).collect();
        let tables = CampaignTransformer::default().transform(&records).unwrap();

        assert_eq!(tables.len(), records.len());
        assert_eq!(tables.campaign.len(), records.len());
        assert_eq!(tables.economics.len(), records.len());

        let input: Vec<i64> = records.iter().map(|r| r.client_id).collect();
        let client: Vec<i64> = tables.client.iter().map(|r| r.client_id).collect();
        let campaign: Vec<i64> = tables.campaign.iter().map(|r| r.client_id).collect();
        let economics: Vec<i64> = tables.economics.iter().map(|r| r.client_id).collect();
        assert_eq!(client, input);
        assert_eq!(campaign, input);
        assert_eq!(economics, input);

        let distinct_in: BTreeSet<i64> = input.iter().copied().collect();
        let distinct_out: BTreeSet<i64> =
            client.into_iter().chain(campaign).chain(economics).collect();
        assert_eq!(distinct_in, distinct_out);
        assert!(tables.issues.is_empty());
    }

    #[test]
    fn test_unrecognized_month_reported() {
        let mut bad = raw(2);
        bad.month = Some("sept".into());
        let records = vec![raw(1), bad];

        let tables = CampaignTransformer::default().transform(&records).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.campaign[1].last_contact_date, None);
        assert_eq!(
            tables.issues,
            vec![DataQualityIssue::UnrecognizedMonth {
                row: 1,
                client_id: 2,
                value: Some("sept".into()),
            }]
        );
    }

    #[test]
    fn test_unrecognized_month_strict() {
        let mut bad = raw(2);
        bad.month = None;
        let transformer = CampaignTransformer::new(TransformOptions { strict_months: true });

        let err = transformer.transform(&[raw(1), bad]).unwrap_err();
        assert!(matches!(
            err,
            TransformError::UnrecognizedMonth { row: 1, client_id: 2, .. }
        ));
    }

    #[test]
    fn test_impossible_date_reported_but_kept() {
        let mut r = raw(5);
        r.day = 31;
        r.month = Some("nov".into());
        let tables = CampaignTransformer::default().transform(&[r]).unwrap();

        assert_eq!(
            tables.campaign[0].last_contact_date.map(|d| d.to_string()).as_deref(),
            Some("2022-11-31")
        );
        assert!(matches!(
            tables.issues.as_slice(),
            [DataQualityIssue::ImpossibleDate { client_id: 5, .. }]
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = CampaignTransformer::default().transform(&[]).unwrap_err();
        assert!(matches!(err, TransformError::EmptyInput));
    }
}
