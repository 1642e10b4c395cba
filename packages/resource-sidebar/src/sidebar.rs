//! The sidebar: form state, currency picker and gateway wired to host callbacks.

use crate::dropdown::{CurrencyDropdown, Point, PointerEvents, Region};
use crate::form::FormState;
use crate::gateway::{ImageFile, ResourceApi};
use crate::notice::{Notice, Notifier};
use crate::view::SidebarView;
use resource_types::{CurrencyUnit, Draft, DraftError, Field, Resource};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

const MSG_CREATED: &str = "Resource added successfully!";
const MSG_UPDATED: &str = "Resource updated successfully!";
const MSG_SAVE_FAILED: &str = "Failed to save resource.";
const MSG_DELETE_NO_ID: &str = "Failed to delete resource: Missing resource ID.";
/// Prompt handed to the delete confirmation callback.
pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this resource?";
const MSG_DELETED: &str = "Resource deleted successfully!";
const MSG_DELETE_FAILED: &str = "Failed to delete resource. Please try again.";
const MSG_UPLOADED: &str = "Image uploaded successfully!";
const MSG_UPLOAD_FAILED: &str = "Failed to upload image. Please check your Cloudinary configuration.";

/// Signed-in user. The email becomes the owner of submitted resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub email: String,
}

impl AuthContext {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Callbacks into the page hosting the sidebar.
pub trait SidebarHost {
    /// Reload the listing after a mutation.
    fn fetch_resources(&mut self);
    /// Hide the sidebar.
    fn close_sidebar(&mut self);
}

/// Add/edit/delete sidebar for one resource.
pub struct ResourceSidebar<A, H> {
    api: A,
    host: H,
    auth: AuthContext,
    notifier: Notifier,
    form: FormState,
    currency: CurrencyDropdown,
    is_open: bool,
}

impl<A: ResourceApi, H: SidebarHost> ResourceSidebar<A, H> {
    /// Build a closed sidebar in add mode. The receiver yields every notice.
    pub fn new(
        api: A,
        host: H,
        auth: AuthContext,
        events: PointerEvents,
    ) -> (Self, UnboundedReceiver<Notice>) {
        let (notifier, rx) = Notifier::channel();
        let sidebar = Self {
            api,
            host,
            auth,
            notifier,
            form: FormState::new(),
            currency: CurrencyDropdown::new(events),
            is_open: false,
        };
        (sidebar, rx)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn draft(&self) -> &Draft {
        self.form.draft()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn currency(&self) -> CurrencyUnit {
        self.currency.selected()
    }

    pub fn is_currency_open(&self) -> bool {
        self.currency.is_open()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Show the sidebar for `editable` (edit mode) or a blank draft (add mode).
    pub fn open(&mut self, editable: Option<Resource>) {
        debug!(edit = editable.is_some(), "Opening resource sidebar");
        self.is_open = true;
        self.form.reinitialize(editable);
    }

    /// Switch the edit target while open. Unsaved edits are discarded.
    pub fn retarget(&mut self, editable: Option<Resource>) {
        self.form.reinitialize(editable);
    }

    /// Hide via the host, discard the draft and close the picker.
    pub fn close(&mut self) {
        self.host.close_sidebar();
        self.is_open = false;
        self.form.reinitialize(None);
        self.currency.close();
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        self.form.set_field(field, value)
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        self.form.set_field_by_name(name, value)
    }

    pub fn toggle_currency(&mut self) {
        self.currency.toggle();
    }

    pub fn select_currency(&mut self, unit: CurrencyUnit) {
        self.currency.select(unit);
    }

    pub fn set_currency_region(&mut self, region: Region) {
        self.currency.set_region(region);
    }

    /// Document pointer-down. Returns `true` if it closed the currency picker.
    pub fn pointer_down(&mut self, at: Point) -> bool {
        self.currency.pointer_down(at)
    }

    pub fn view(&self) -> SidebarView {
        SidebarView::build(self.is_open, &self.form, &self.currency)
    }

    /// Create (add mode) or update (edit mode) the resource.
    ///
    /// On success the host refreshes, the sidebar closes, then a success
    /// notice is queued. On failure the draft and open state are untouched.
    pub async fn submit(&mut self) -> Result<(), crate::Error> {
        let payload = match self.form.draft().to_payload(&self.auth.email) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Submit rejected locally");
                self.notifier.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        let result = match self.form.target_id().map(str::to_owned) {
            Some(id) => self
                .api
                .update(&id, &payload)
                .await
                .map(|()| MSG_UPDATED),
            None => self.api.create(&payload).await.map(|()| MSG_CREATED),
        };

        match result {
            Ok(message) => {
                info!(title = %payload.title, "Resource saved");
                self.host.fetch_resources();
                self.close();
                self.notifier.push(Notice::success(message));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to save resource");
                self.notifier.push(Notice::error(MSG_SAVE_FAILED));
                Err(e)
            }
        }
    }

    /// Delete the edit target after `confirm` approves [`CONFIRM_DELETE`].
    pub async fn delete_resource(
        &mut self,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<(), crate::Error> {
        let Some(id) = self.form.target_id().map(str::to_owned) else {
            warn!("Delete requested without a resource id");
            self.notifier.push(Notice::error(MSG_DELETE_NO_ID));
            return Err(crate::Error::MissingId);
        };

        if !confirm(CONFIRM_DELETE) {
            debug!(id = %id, "Delete not confirmed");
            return Err(crate::Error::Declined);
        }

        match self.api.delete(&id).await {
            Ok(()) => {
                info!(id = %id, "Resource deleted");
                self.host.fetch_resources();
                self.close();
                self.notifier.push(Notice::success(MSG_DELETED));
                Ok(())
            }
            Err(e) => {
                error!(id = %id, error = %e, "Failed to delete resource");
                self.notifier.push(Notice::error(MSG_DELETE_FAILED));
                Err(e)
            }
        }
    }

    /// Upload `file` and make its URL the draft's image. Not retried.
    pub async fn upload_image(&mut self, file: ImageFile) -> Result<(), crate::Error> {
        let result = match self.api.upload_ticket().await {
            Ok(ticket) => self.api.upload_image(&file, &ticket).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(url) => {
                info!(file = %file.file_name, url = %url, "Image uploaded");
                self.form.set_image_url(url);
                self.notifier.push(Notice::success(MSG_UPLOADED));
                Ok(())
            }
            Err(e) => {
                error!(file = %file.file_name, error = %e, "Image upload failed");
                self.notifier.push(Notice::error(MSG_UPLOAD_FAILED));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::UploadTicket;
    use crate::notice::{drain, NoticeLevel};
    use resource_types::{ResourcePayload, TradeType};
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(ResourcePayload),
        Update(String, ResourcePayload),
        Delete(String),
        Ticket,
        Upload(String),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        fail: Cell<bool>,
        fail_ticket: Cell<bool>,
    }

    impl FakeApi {
        fn outcome(&self) -> Result<(), crate::Error> {
            if self.fail.get() {
                Err(crate::Error::Http("HTTP error: 500 Internal Server Error".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl ResourceApi for FakeApi {
        async fn create(&self, payload: &ResourcePayload) -> Result<(), crate::Error> {
            self.calls.borrow_mut().push(Call::Create(payload.clone()));
            self.outcome()
        }

        async fn update(&self, id: &str, payload: &ResourcePayload) -> Result<(), crate::Error> {
            self.calls
                .borrow_mut()
                .push(Call::Update(id.to_string(), payload.clone()));
            self.outcome()
        }

        async fn delete(&self, id: &str) -> Result<(), crate::Error> {
            self.calls.borrow_mut().push(Call::Delete(id.to_string()));
            self.outcome()
        }

        async fn upload_ticket(&self) -> Result<UploadTicket, crate::Error> {
            self.calls.borrow_mut().push(Call::Ticket);
            if self.fail_ticket.get() {
                return Err(crate::Error::Http("upload signature failed".into()));
            }
            Ok(UploadTicket {
                timestamp: "1718000000".into(),
                signature: "sig".into(),
            })
        }

        async fn upload_image(
            &self,
            file: &ImageFile,
            _ticket: &UploadTicket,
        ) -> Result<String, crate::Error> {
            self.calls
                .borrow_mut()
                .push(Call::Upload(file.file_name.clone()));
            self.outcome()?;
            Ok(format!("https://img.example/{}", file.file_name))
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        events: Vec<&'static str>,
    }

    impl SidebarHost for RecordingHost {
        fn fetch_resources(&mut self) {
            self.events.push("fetch");
        }

        fn close_sidebar(&mut self) {
            self.events.push("close");
        }
    }

    type TestSidebar = ResourceSidebar<FakeApi, RecordingHost>;

    fn sidebar() -> (TestSidebar, UnboundedReceiver<Notice>, PointerEvents) {
        let events = PointerEvents::new();
        let (sidebar, rx) = ResourceSidebar::new(
            FakeApi::default(),
            RecordingHost::default(),
            AuthContext::new("ana@example.com"),
            events.clone(),
        );
        (sidebar, rx, events)
    }

    fn stored() -> Resource {
        Resource {
            id: Some("66f0c1".into()),
            title: "Guitar".into(),
            description: "Six strings".into(),
            trade_type: TradeType::Barter,
            price: None,
            in_return: Some("Amp".into()),
            quantity: Some(1),
            img: Some("https://img.example/guitar.png".into()),
            owner_email: Some("ana@example.com".into()),
        }
    }

    fn fill_bike(sidebar: &mut TestSidebar) {
        sidebar.set_field(Field::Title, "Bike").unwrap();
        sidebar.set_field(Field::Quantity, "2").unwrap();
        sidebar.set_field(Field::TradeType, "Monetary Trade").unwrap();
        sidebar.set_field(Field::Price, "5").unwrap();
        sidebar
            .form
            .set_image_url("https://img.example/bike.png");
    }

    #[tokio::test]
    async fn test_submit_without_image_sends_nothing() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(None);
        sidebar.set_field(Field::Title, "Bike").unwrap();

        let result = sidebar.submit().await;

        assert!(matches!(
            result,
            Err(crate::Error::Draft(DraftError::MissingRequired))
        ));
        assert!(sidebar.api().calls().is_empty());
        assert!(sidebar.host().events.is_empty());
        let notices = drain(&mut rx);
        assert_eq!(
            notices,
            vec![Notice::error("Please fill all required fields and upload an image.")]
        );
        assert!(sidebar.is_open());
    }

    #[tokio::test]
    async fn test_create_posts_normalized_payload() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(None);
        fill_bike(&mut sidebar);
        sidebar.set_field(Field::InReturn, "leftover").unwrap();

        sidebar.submit().await.unwrap();

        let calls = sidebar.api().calls();
        assert_eq!(calls.len(), 1);
        let Call::Create(payload) = &calls[0] else {
            panic!("expected create, got {:?}", calls[0]);
        };
        assert_eq!(payload.title, "Bike");
        assert_eq!(payload.quantity, 2);
        assert_eq!(payload.price.as_deref(), Some("5"));
        assert_eq!(payload.in_return, None);
        assert_eq!(payload.owner_email, "ana@example.com");
        assert_eq!(drain(&mut rx), vec![Notice::success(MSG_CREATED)]);
    }

    #[tokio::test]
    async fn test_success_refreshes_then_closes_once() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(None);
        fill_bike(&mut sidebar);

        sidebar.submit().await.unwrap();

        assert_eq!(sidebar.host().events, vec!["fetch", "close"]);
        assert!(!sidebar.is_open());
        assert_eq!(sidebar.draft(), &Draft::default());
    }

    #[tokio::test]
    async fn test_edit_mode_updates_by_id() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(Some(stored()));
        sidebar.set_field(Field::InReturn, "Pedal").unwrap();

        sidebar.submit().await.unwrap();

        let calls = sidebar.api().calls();
        let [Call::Update(id, payload)] = calls.as_slice() else {
            panic!("expected a single update, got {calls:?}");
        };
        assert_eq!(id, "66f0c1");
        assert_eq!(payload.price, None);
        assert_eq!(payload.in_return.as_deref(), Some("Pedal"));
        assert_eq!(payload.img, "https://img.example/guitar.png");
        assert_eq!(sidebar.host().events, vec!["fetch", "close"]);
        assert_eq!(drain(&mut rx), vec![Notice::success(MSG_UPDATED)]);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_sidebar_open() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(None);
        fill_bike(&mut sidebar);
        let before = sidebar.draft().clone();
        sidebar.api().fail.set(true);

        assert!(matches!(sidebar.submit().await, Err(crate::Error::Http(_))));

        assert!(sidebar.host().events.is_empty());
        assert!(sidebar.is_open());
        assert_eq!(sidebar.draft(), &before);
        assert_eq!(drain(&mut rx), vec![Notice::error(MSG_SAVE_FAILED)]);
    }

    #[tokio::test]
    async fn test_failed_update_triggers_no_callbacks() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(Some(stored()));
        sidebar.api().fail.set(true);

        assert!(sidebar.submit().await.is_err());
        assert!(sidebar.host().events.is_empty());
        assert!(sidebar.form().is_edit_mode());
    }

    #[tokio::test]
    async fn test_delete_without_id_is_local_error() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(None);
        let mut asked = false;

        let result = sidebar
            .delete_resource(|_| {
                asked = true;
                true
            })
            .await;

        assert!(matches!(result, Err(crate::Error::MissingId)));
        assert!(!asked);
        assert!(sidebar.api().calls().is_empty());
        assert_eq!(drain(&mut rx), vec![Notice::error(MSG_DELETE_NO_ID)]);
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(Some(stored()));

        let result = sidebar.delete_resource(|_| false).await;

        assert!(matches!(result, Err(crate::Error::Declined)));
        assert!(sidebar.api().calls().is_empty());
        assert!(sidebar.host().events.is_empty());
        assert!(drain(&mut rx).is_empty());
        assert!(sidebar.is_open());
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(Some(stored()));
        let mut prompt = String::new();

        sidebar
            .delete_resource(|msg| {
                prompt = msg.to_string();
                true
            })
            .await
            .unwrap();

        assert_eq!(prompt, CONFIRM_DELETE);
        assert_eq!(sidebar.api().calls(), vec![Call::Delete("66f0c1".into())]);
        assert_eq!(sidebar.host().events, vec!["fetch", "close"]);
        assert_eq!(drain(&mut rx), vec![Notice::success(MSG_DELETED)]);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_state() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(Some(stored()));
        sidebar.api().fail.set(true);

        assert!(sidebar.delete_resource(|_| true).await.is_err());

        assert!(sidebar.host().events.is_empty());
        assert!(sidebar.is_open());
        assert_eq!(sidebar.form().target_id(), Some("66f0c1"));
        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_upload_sets_image_url() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(None);

        sidebar
            .upload_image(ImageFile::new("bike.png", vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(sidebar.draft().image_url, "https://img.example/bike.png");
        assert_eq!(
            sidebar.api().calls(),
            vec![Call::Ticket, Call::Upload("bike.png".into())]
        );
        assert_eq!(drain(&mut rx), vec![Notice::success(MSG_UPLOADED)]);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_image() {
        let (mut sidebar, mut rx, _) = sidebar();
        sidebar.open(Some(stored()));
        sidebar.api().fail.set(true);

        assert!(sidebar
            .upload_image(ImageFile::new("new.png", vec![1]))
            .await
            .is_err());

        assert_eq!(sidebar.draft().image_url, "https://img.example/guitar.png");
        assert_eq!(drain(&mut rx), vec![Notice::error(MSG_UPLOAD_FAILED)]);
    }

    #[tokio::test]
    async fn test_ticket_failure_skips_image_host() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(None);
        sidebar.api().fail_ticket.set(true);

        assert!(sidebar
            .upload_image(ImageFile::new("bike.png", vec![1]))
            .await
            .is_err());

        assert_eq!(sidebar.api().calls(), vec![Call::Ticket]);
        assert_eq!(sidebar.draft().image_url, "");
    }

    #[test]
    fn test_reopen_in_add_mode_yields_defaults() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(Some(stored()));
        sidebar.set_field(Field::Title, "Changed").unwrap();
        sidebar.close();
        sidebar.open(None);

        assert_eq!(sidebar.draft(), &Draft::default());
        assert!(!sidebar.form().is_edit_mode());
        assert_eq!(sidebar.host().events, vec!["close"]);
    }

    #[test]
    fn test_close_releases_currency_listener() {
        let (mut sidebar, _rx, events) = sidebar();
        sidebar.open(None);
        sidebar.toggle_currency();
        assert_eq!(events.listener_count(), 1);

        sidebar.close();

        assert!(!sidebar.is_currency_open());
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_outside_pointer_down_closes_currency_picker() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(None);
        sidebar.set_currency_region(Region::new(200.0, 300.0, 60.0, 90.0));
        sidebar.toggle_currency();

        assert!(!sidebar.pointer_down(Point::new(220.0, 320.0)));
        assert!(sidebar.is_currency_open());
        assert!(sidebar.pointer_down(Point::new(5.0, 5.0)));
        assert!(!sidebar.is_currency_open());
    }

    #[tokio::test]
    async fn test_currency_choice_not_sent() {
        let (mut sidebar, _rx, _) = sidebar();
        sidebar.open(None);
        fill_bike(&mut sidebar);
        sidebar.toggle_currency();
        sidebar.select_currency(CurrencyUnit::Wei);
        assert_eq!(sidebar.currency(), CurrencyUnit::Wei);

        sidebar.submit().await.unwrap();

        let calls = sidebar.api().calls();
        let Call::Create(payload) = &calls[0] else {
            panic!("expected create");
        };
        let body = serde_json::to_value(payload).unwrap();
        assert!(body.get("currency").is_none());
        assert_eq!(body["price"], "5");
    }
}
