// GraphQL operation documents.
//
// Each operation selects exactly one root field; `field` is the key the
// client pulls out of the response `data` object.

/// A named GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name sent as `operationName` (and used in logs).
    pub name: &'static str,
    /// Root field carrying the result inside `data`.
    pub field: &'static str,
    /// Full document text.
    pub document: &'static str,
}

pub const GET_WEBSITES: Operation = Operation {
    name: "getWebsites",
    field: "getWebsites",
    document: "query getWebsites {
  getWebsites {
    id
    url
    monitered
    latestStatus
    title
  }
}",
};

pub const CHECK_STATUS: Operation = Operation {
    name: "checkStatus",
    field: "checkStatus",
    document: "query checkStatus($websiteId: ID!) {
  checkStatus(websiteId: $websiteId) {
    statusCode
    timestamp
  }
}",
};

pub const CREATE_WEBSITE: Operation = Operation {
    name: "createWebsite",
    field: "createWebsite",
    document: "mutation createWebsite($url: String!, $email: String, $title: String) {
  createWebsite(url: $url, email: $email, title: $title) {
    id
    url
    monitered
    latestStatus
    title
  }
}",
};

pub const DELETE_WEBSITE: Operation = Operation {
    name: "deleteWebsite",
    field: "deleteWebsite",
    document: "mutation deleteWebsite($websiteId: ID!) {
  deleteWebsite(websiteId: $websiteId)
}",
};

pub const START_MONITORING: Operation = Operation {
    name: "startMonitoring",
    field: "startMonitoring",
    document: "mutation startMonitoring($websiteId: ID!) {
  startMonitoring(websiteId: $websiteId) {
    statusCode
    timestamp
  }
}",
};

pub const STOP_MONITORING: Operation = Operation {
    name: "stopMonitoring",
    field: "stopMonitoring",
    document: "mutation stopMonitoring($websiteId: ID!) {
  stopMonitoring(websiteId: $websiteId) {
    id
    url
    latestStatus
    monitered
    title
  }
}",
};

pub const GET_REPORT: Operation = Operation {
    name: "getReport",
    field: "getReport",
    document: "mutation getReport($websiteId: ID!) {
  getReport(websiteId: $websiteId) {
    id
    url
    history {
      statusCode
      timestamp
    }
  }
}",
};
