//! The uniform envelope returned by every request operation.
//!
//! # Design
//! The stored `success` flag is only one input to [`RequestResult::is_success`].
//! A result also needs a response, a 2xx status and no captured error before
//! it counts as successful, so a result assembled with an inconsistent flag
//! still reports failure.

use crate::error::HelperError;
use crate::http::HttpResponse;

/// Outcome of a request: status flag, raw response, parsed data and error.
///
/// Fields are fixed at construction. Ownership of the response (and its
/// read-once body) passes to whoever consumes the result.
#[derive(Debug)]
pub struct RequestResult<T> {
    success: bool,
    response: Option<HttpResponse>,
    data: Option<T>,
    error: Option<HelperError>,
}

/// Result of a base verb call; nothing is parsed at that layer.
pub type RawResult = RequestResult<()>;

impl<T> RequestResult<T> {
    pub fn new(
        success: bool,
        response: Option<HttpResponse>,
        data: Option<T>,
        error: Option<HelperError>,
    ) -> Self {
        Self {
            success,
            response,
            data,
            error,
        }
    }

    pub fn succeeded(response: HttpResponse, data: Option<T>) -> Self {
        Self::new(true, Some(response), data, None)
    }

    pub fn failed(response: Option<HttpResponse>, error: HelperError) -> Self {
        Self::new(false, response, None, Some(error))
    }

    /// `true` only if the flag is set, no error was captured, a response is
    /// present and its status is 2xx.
    pub fn is_success(&self) -> bool {
        self.success
            && self.error.is_none()
            && self.response.as_ref().is_some_and(HttpResponse::is_success)
    }

    /// The stored flag, without the derived checks.
    pub fn success_flag(&self) -> bool {
        self.success
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&HelperError> {
        self.error.as_ref()
    }

    pub fn into_response(self) -> Option<HttpResponse> {
        self.response
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn into_parts(
        self,
    ) -> (bool, Option<HttpResponse>, Option<T>, Option<HelperError>) {
        (self.success, self.response, self.data, self.error)
    }

    /// Convert into a plain `Result`, dropping the response.
    pub fn into_result(self) -> Result<Option<T>, HelperError> {
        let success = self.is_success();
        match self.error {
            Some(err) => Err(err),
            None if success => Ok(self.data),
            None => match self.response {
                Some(response) => Err(HelperError::Status {
                    status: response.status,
                }),
                None => Err(HelperError::NoResponse),
            },
        }
    }

    /// Same envelope with the data dropped and retyped.
    pub fn without_data<U>(self) -> RequestResult<U> {
        RequestResult {
            success: self.success,
            response: self.response,
            data: None,
            error: self.error,
        }
    }

    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> RequestResult<U> {
        RequestResult {
            success: self.success,
            response: self.response,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderSet;
    use crate::http::ResponseBody;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: HeaderSet::new(),
            body: ResponseBody::empty(),
        }
    }

    #[test]
    fn consistent_success() {
        let result: RawResult = RequestResult::succeeded(response(200), None);
        assert!(result.is_success());
    }

    #[test]
    fn flag_false_is_failure() {
        let result: RawResult = RequestResult::new(false, Some(response(200)), None, None);
        assert!(!result.is_success());
    }

    #[test]
    fn error_present_is_failure() {
        let result: RawResult = RequestResult::new(
            true,
            Some(response(200)),
            None,
            Some(HelperError::Deserialization("bad".to_string())),
        );
        assert!(!result.is_success());
    }

    #[test]
    fn missing_response_is_failure() {
        let result: RawResult = RequestResult::new(true, None, None, None);
        assert!(!result.is_success());
    }

    #[test]
    fn non_2xx_status_is_failure_despite_flag() {
        let result: RawResult = RequestResult::new(true, Some(response(404)), None, None);
        assert!(result.success_flag());
        assert!(!result.is_success());
    }

    #[test]
    fn map_data_keeps_envelope() {
        let result = RequestResult::succeeded(response(201), Some(2)).map_data(|n| n * 10);
        assert_eq!(result.status(), Some(201));
        assert_eq!(result.data(), Some(&20));
        assert!(result.is_success());
    }

    #[test]
    fn into_result_reports_status() {
        let result: RawResult = RequestResult::new(true, Some(response(500)), None, None);
        let err = result.into_result().unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn into_result_without_response_is_no_response() {
        let result: RawResult = RequestResult::new(true, None, None, None);
        let err = result.into_result().unwrap_err();
        assert!(matches!(err, HelperError::NoResponse));
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "no response received");
    }
}
