// PEP proxy lifecycle

use crate::domain::Proxy;
use crate::errors::{IdmError, Result};
use crate::manager::IdmManager;
use reqwest::Method;

fn proxy_path(application_id: &str) -> [&str; 4] {
    ["v1", "applications", application_id, "pep_proxies"]
}

impl IdmManager {
    /// GET /v1/applications/{application_id}/pep_proxies
    ///
    /// The service never discloses the password here.
    pub async fn get_proxy(&self, application_id: &str) -> Result<Option<Proxy>> {
        let response = self
            .execute(
                "get_proxy",
                self.request(Method::GET, &proxy_path(application_id)),
            )
            .await?;

        if !response.is_ok() {
            return Ok(None);
        }

        let raw = response.envelope("pep_proxy")?;
        Ok(Some(Proxy::from_response(None, raw)?))
    }

    /// POST /v1/applications/{application_id}/pep_proxies
    ///
    /// Fails if the application already has a proxy. The returned record is
    /// the only place the initial password shows up.
    pub async fn create_proxy(&self, application_id: &str) -> Result<Proxy> {
        let response = self
            .execute(
                "create_proxy",
                self.request(Method::POST, &proxy_path(application_id)),
            )
            .await?
            .error_for_status()?;

        let proxy = Proxy::from_response(None, response.envelope("pep_proxy")?)?;
        self.logger().info(&format!(
            "IDM proxy \"{}\" created for application {}",
            proxy.id(),
            application_id
        ));

        Ok(proxy)
    }

    /// DELETE /v1/applications/{application_id}/pep_proxies
    pub async fn delete_proxy(&self, application_id: &str) -> Result<()> {
        self.execute(
            "delete_proxy",
            self.request(Method::DELETE, &proxy_path(application_id)),
        )
        .await?
        .error_for_status()?;
        Ok(())
    }

    /// PATCH /v1/applications/{application_id}/pep_proxies
    ///
    /// Rotates the proxy password. The current proxy is fetched first and
    /// its password is refreshed from the service answer. Returns `None`
    /// when the application has no proxy.
    ///
    /// The service has already rotated the password when the answer lacks
    /// one; the resulting [`IdmError::Decode`] carries the raw answer.
    pub async fn reset_proxy(&self, application_id: &str) -> Result<Option<Proxy>> {
        let mut proxy = match self.get_proxy(application_id).await? {
            Some(proxy) => proxy,
            None => return Ok(None),
        };

        let response = self
            .execute(
                "reset_proxy",
                self.request(Method::PATCH, &proxy_path(application_id)),
            )
            .await?
            .error_for_status()?;

        let changes = response.json()?;
        if proxy.update(&changes).is_err() {
            return Err(IdmError::Decode(format!(
                "proxy {} password was reset but the response carries no password: {}",
                proxy.id(),
                response.body.trim()
            )));
        }

        Ok(Some(proxy))
    }
}
