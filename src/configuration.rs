pub trait Configuration: Clone + Send + Sync + 'static {
    /// Base address of the reservation service.
    fn api_url(&self) -> String;
    fn title(&self) -> String;
}
