pub mod esp_wifi_station;
