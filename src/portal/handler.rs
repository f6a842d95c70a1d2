//! Portal request handler
//!
//! Each action is one read-validate-write-redisplay cycle:
//! 1. Read the sheet (or serve the cached read)
//! 2. Locate the target vendor, if the action has one
//! 3. Validate submitted values against the form schema
//! 4. Apply the mutation through the record store
//! 5. Re-read and return the refreshed listing
//!
//! No failure is fatal: every error becomes a response and the caller
//! moves on to the next action.

use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tracing::{info, info_span};

use crate::record::{first_position_named, RecordCodec, VendorRecord};
use crate::schema::{FormSchema, FormValues, SchemaValidator};
use crate::store::{ReadOutcome, RecordStore, SheetBackend, SheetSnapshot};

use super::errors::{PortalError, PortalResult};
use super::render::render_form;
use super::request::{Action, Request, VendorTarget};
use super::response::Response;

/// Key of the field that names a vendor
pub const NAME_FIELD: &str = "company_name";

/// Handles portal requests for one session
pub struct PortalHandler<B: SheetBackend> {
    schema: FormSchema,
    store: RecordStore<B>,
    today: Option<NaiveDate>,
}

impl<B: SheetBackend> PortalHandler<B> {
    pub fn new(schema: FormSchema, store: RecordStore<B>) -> Self {
        Self {
            schema,
            store,
            today: None,
        }
    }

    /// Pin the date used for date-field defaults
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<B> {
        &mut self.store
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Column holding the vendor name (first field when the schema has
    /// no `company_name`)
    fn name_column(&self) -> usize {
        self.schema.position_of(NAME_FIELD).unwrap_or(0)
    }

    /// Handle a raw JSON request string
    pub fn handle(&mut self, json_request: &str) -> Response {
        match Request::parse(json_request) {
            Ok(request) => self.dispatch(request),
            Err(e) => Response::from_error(e),
        }
    }

    /// Handle a parsed request
    pub fn dispatch(&mut self, request: Request) -> Response {
        let action = request.action();
        let span = info_span!("portal_action", action = action.name());
        let _guard = span.enter();

        let result = match request {
            Request::Onboard { values } => self.onboard(&values),
            Request::Update { target, values } => self.update(&target, &values),
            Request::View => self.view(),
            Request::Delete { target } => self.delete(&target),
            Request::Form { target } => self.form(target.as_ref()),
            Request::Actions => Ok(actions_menu()),
        };

        match result {
            Ok(data) => Response::success(data),
            Err(e) => {
                info!(code = e.code().code(), "action failed");
                Response::from_error(e)
            }
        }
    }

    /// Onboard New Vendor
    pub fn onboard(&mut self, values: &FormValues) -> PortalResult<Value> {
        self.check(values)?;

        let record = RecordCodec::new(&self.schema).encode(values);
        self.store.append(&record)?;

        Ok(self.with_listing("Vendor details successfully submitted!", json!({})))
    }

    /// Update Existing Vendor
    pub fn update(&mut self, target: &VendorTarget, values: &FormValues) -> PortalResult<Value> {
        let snapshot = self.store.read_all().into_result()?;
        let (index, position) = self.locate(&snapshot, target)?;

        self.check(values)?;

        let record = RecordCodec::new(&self.schema).encode(values);
        self.store.update_at(position, &record)?;

        Ok(self.with_listing(
            "Vendor details successfully updated!",
            json!({ "position": index }),
        ))
    }

    /// View All Vendors
    pub fn view(&mut self) -> PortalResult<Value> {
        let snapshot = self.store.read_all().into_result()?;
        Ok(listing_json(&snapshot))
    }

    /// Delete Vendor
    pub fn delete(&mut self, target: &VendorTarget) -> PortalResult<Value> {
        let snapshot = self.store.read_all().into_result()?;
        let (index, position) = self.locate(&snapshot, target)?;
        let name = snapshot.records[index]
            .get(self.name_column())
            .unwrap_or_default()
            .to_string();

        self.store.delete_at(position)?;

        let message = format!("Vendor '{}' successfully deleted!", name);
        Ok(self.with_listing(&message, json!({ "position": index })))
    }

    /// Describe the form, pre-filled from `target` when given
    pub fn form(&mut self, target: Option<&VendorTarget>) -> PortalResult<Value> {
        let (values, submit, position) = match target {
            Some(target) => {
                let snapshot = self.store.read_all().into_result()?;
                let (index, _) = self.locate(&snapshot, target)?;
                let values = RecordCodec::new(&self.schema).decode(&snapshot.records[index]);
                (values, "Update Vendor Details", Some(index))
            }
            None => (FormValues::new(), "Submit Vendor Details", None),
        };

        let widgets = render_form(&self.schema, &values, self.today());
        Ok(json!({
            "fields": widgets,
            "submit": submit,
            "position": position,
        }))
    }

    fn check(&self, values: &FormValues) -> PortalResult<()> {
        let errors = SchemaValidator::new(&self.schema).validate(values);
        if errors.is_empty() {
            Ok(())
        } else {
            info!(errors = errors.len(), "submission rejected");
            Err(PortalError::Validation(errors))
        }
    }

    /// Listing index and data position of `target` in `snapshot`.
    ///
    /// Requests count positions over the listing; the store counts them
    /// over the sheet, blank rows included. Names resolve to their first
    /// match. Only the given snapshot is consulted; whether the sheet
    /// changed since is not detected.
    fn locate(
        &self,
        snapshot: &SheetSnapshot,
        target: &VendorTarget,
    ) -> PortalResult<(usize, usize)> {
        let index = match target {
            VendorTarget::Position(p) => Some(*p),
            VendorTarget::Name(name) => {
                first_position_named(&snapshot.records, self.name_column(), name)
            }
        };
        index
            .and_then(|i| snapshot.position(i).map(|position| (i, position)))
            .ok_or_else(|| PortalError::VendorNotFound(target.describe()))
    }

    /// Success payload with `message`, `extra` fields and the refreshed listing
    fn with_listing(&mut self, message: &str, extra: Value) -> Value {
        let outcome: ReadOutcome = self.store.read_all();

        let mut data = json!({ "message": message });
        if let (Some(data_obj), Value::Object(extra)) = (data.as_object_mut(), extra) {
            data_obj.extend(extra);
            data_obj.insert("vendors".into(), listing_json(&outcome.snapshot));
            if let Some(e) = &outcome.error {
                data_obj.insert("warning".into(), Value::String(e.user_message()));
            }
        }
        data
    }
}

/// Header and rows as JSON
pub fn listing_json(snapshot: &SheetSnapshot) -> Value {
    json!({
        "header": snapshot.header,
        "rows": snapshot.records.iter().map(VendorRecord::cells).collect::<Vec<_>>(),
        "count": snapshot.records.len(),
    })
}

fn actions_menu() -> Value {
    let actions: Vec<Value> = Action::MENU
        .iter()
        .map(|a| json!({ "action": a.name(), "label": a.label() }))
        .collect();
    json!({ "prompt": Action::Actions.label(), "actions": actions })
}
