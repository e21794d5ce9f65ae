use proptest::prelude::*;

use bridge_types::{
    decode_request, decode_response, decode_result, encode_request, encode_response,
    encode_result, HttpRequest, HttpResponse, LangError, MessageResult,
};

fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    // a small name alphabet makes duplicate names likely
    prop::collection::vec(("[A-C]{1,2}", ".{0,8}"), 0..6)
}

fn request() -> impl Strategy<Value = HttpRequest> {
    (
        "https?://[a-z]{1,10}/[a-z0-9/]{0,12}",
        "GET|POST|put|DELETE|PATCH",
        headers(),
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(url, method, headers, body)| HttpRequest {
            url,
            method,
            headers,
            body,
        })
}

fn response() -> impl Strategy<Value = HttpResponse> {
    (
        any::<u16>(),
        ".{0,16}",
        headers(),
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(status_code, reason_phrase, headers, body)| HttpResponse {
            status_code,
            reason_phrase,
            headers,
            body,
        })
}

proptest! {
    #[test]
    fn request_round_trips(request in request()) {
        let bytes = encode_request(&request);
        prop_assert_eq!(&bytes, &encode_request(&request));
        prop_assert_eq!(decode_request(&bytes).unwrap(), request);
    }

    #[test]
    fn response_round_trips(response in response()) {
        prop_assert_eq!(decode_response(&encode_response(&response)).unwrap(), response);
    }

    #[test]
    fn truncated_request_never_decodes(request in request(), cut in 1usize..256) {
        let bytes = encode_request(&request);
        let cut = cut.min(bytes.len());
        prop_assert!(decode_request(&bytes[..bytes.len() - cut]).is_err());
    }

    #[test]
    fn truncated_response_never_decodes(response in response(), cut in 1usize..256) {
        let bytes = encode_response(&response);
        let cut = cut.min(bytes.len());
        prop_assert!(decode_response(&bytes[..bytes.len() - cut]).is_err());
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = decode_request(&bytes);
        let _ = decode_response(&bytes);
        let _ = decode_result::<HttpResponse, LangError>(&bytes);
    }

    #[test]
    fn result_holds_exactly_one_payload(response in response(), failed in any::<bool>()) {
        let result: MessageResult<HttpResponse> = if failed {
            Err(LangError::CouldNotReadInput)
        } else {
            Ok(response)
        };
        let decoded = decode_result::<HttpResponse, LangError>(&encode_result(&result)).unwrap();
        prop_assert_eq!(decoded.is_ok(), !failed);
        prop_assert_eq!(decoded.is_err(), failed);
        prop_assert_eq!(decoded, result);
    }
}
